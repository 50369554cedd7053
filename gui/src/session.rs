use fissure_gauge::{MeasureParams, Measurement};
use image::RgbImage;

/// Mutable state of one measurement session.
///
/// Owned by the application struct instead of living as ad-hoc fields on a
/// widget; every field is replaced wholesale by the UI event that produces it.
#[derive(Debug, Default)]
pub struct Session {
    /// Decoded source image in RGB channel order; `None` until the first
    /// successful load.
    pub image: Option<RgbImage>,
    /// Crop produced by the most recent rectangle selection.
    pub selection: Option<RgbImage>,
    /// Result of the most recent successful measurement.
    pub measurement: Option<Measurement>,
    pub params: MeasureParams,
}

impl Session {
    /// Installs a freshly loaded image and drops everything derived from the
    /// previous one.
    pub fn replace_image(&mut self, image: RgbImage) {
        self.image = Some(image);
        self.selection = None;
        self.measurement = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fissure_gauge::measure_fissure;
    use image::Rgb;

    #[test]
    fn test_replace_image_discards_derived_state() {
        let mut session = Session::default();

        let mut first = RgbImage::new(60, 50);
        for pixel in first.pixels_mut() {
            *pixel = Rgb([200, 200, 200]);
        }
        session.replace_image(first.clone());

        let analysis = measure_fissure(&first, &session.params);
        session.selection = Some(first);
        session.measurement = analysis.ok().map(|a| a.measurement);

        session.replace_image(RgbImage::new(10, 10));
        assert!(session.image.is_some());
        assert!(session.selection.is_none());
        assert!(session.measurement.is_none());
    }
}
