use std::path::PathBuf;

use fissure_gauge::{DragExtents, MeasureError, crop_selection, measure_fissure};
use iced::widget::{button, canvas, column, container, image as iced_image, row, text};
use iced::{Element, Length, Task, Theme};
use image::RgbImage;

mod selector;
mod session;

use selector::ImageSelector;
use session::Session;

pub fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title(|_state: &App| "Fissure Gauge".to_string())
        .theme(|_state: &App| Theme::Dark)
        .run()
}

struct App {
    session: Session,

    // Display handles for the two panes.
    source_handle: Option<iced_image::Handle>,
    processed_handle: Option<iced_image::Handle>,

    // Set by "Calculate"; stays empty until a measurement exists.
    result_label: String,
    status: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenImage,
    /// `None` when the file dialog was cancelled.
    ImageOpened(Option<Result<LoadedImage, LoadError>>),
    SelectionMade(DragExtents),
    Calculate,
    WarningDismissed,
}

#[derive(Debug, Clone)]
pub struct LoadedImage {
    path: PathBuf,
    pixels: RgbImage,
}

#[derive(Debug, Clone)]
pub struct LoadError {
    path: PathBuf,
    message: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            session: Session::default(),
            source_handle: None,
            processed_handle: None,
            result_label: String::new(),
            status: "Open an image to start".to_string(),
        }
    }
}

impl App {
    fn new() -> (Self, Task<Message>) {
        (Self::default(), Task::none())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenImage => {
                self.status = "Choosing an image...".to_string();
                Task::perform(open_image(), Message::ImageOpened)
            }
            Message::ImageOpened(None) => {
                // Dialog cancelled; nothing changes.
                self.status = "Open an image to start".to_string();
                Task::none()
            }
            Message::ImageOpened(Some(Ok(loaded))) => {
                log::info!(
                    "loaded {} ({}x{})",
                    loaded.path.display(),
                    loaded.pixels.width(),
                    loaded.pixels.height()
                );
                self.source_handle = Some(rgb_handle(&loaded.pixels));
                self.processed_handle = None;
                self.session.replace_image(loaded.pixels);
                self.status = "Drag a rectangle over the region to measure".to_string();
                Task::none()
            }
            Message::ImageOpened(Some(Err(error))) => {
                log::warn!("cannot open {}: {}", error.path.display(), error.message);
                self.status = format!("Could not open {}", error.path.display());
                Task::perform(show_decode_warning(error), |_| Message::WarningDismissed)
            }
            Message::WarningDismissed => Task::none(),
            Message::SelectionMade(extents) => {
                self.measure_selection(extents);
                Task::none()
            }
            Message::Calculate => {
                if let Some(measurement) = &self.session.measurement {
                    self.result_label = format!(
                        "Length of fissure: {}\nWidth of fissure: {}",
                        measurement.length, measurement.width
                    );
                }
                Task::none()
            }
        }
    }

    fn measure_selection(&mut self, extents: DragExtents) {
        let Some(image) = &self.session.image else {
            return;
        };

        let Some(rect) = extents.to_pixel_rect(image.width(), image.height()) else {
            self.status = "Selection is empty".to_string();
            return;
        };

        let selection = crop_selection(image, &rect);
        match measure_fissure(&selection, &self.session.params) {
            Ok(analysis) => {
                log::info!(
                    "measured {}x{} at selection {:?}",
                    analysis.measurement.width,
                    analysis.measurement.length,
                    (rect.x, rect.y, rect.width, rect.height)
                );
                self.processed_handle = Some(rgb_handle(&analysis.annotated));
                self.session.selection = Some(selection);
                self.session.measurement = Some(analysis.measurement);
                self.status = "Press Calculate to show the measurement".to_string();
            }
            // Prior selection and measurement stay untouched.
            Err(MeasureError::NoRegionFound) => {
                self.status = "No measurable region in the selection".to_string();
            }
            Err(MeasureError::EmptySelection) => {
                self.status = "Selection is empty".to_string();
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let left: Element<'_, Message> = match (&self.source_handle, &self.session.image) {
            (Some(handle), Some(image)) => canvas(ImageSelector::new(
                handle.clone(),
                image.width(),
                image.height(),
            ))
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
            _ => empty_pane("No image"),
        };

        let right = match &self.processed_handle {
            Some(handle) => image_display(handle),
            None => empty_pane("No selection"),
        };

        let panes = row![
            column![text("Original").size(16), left]
                .spacing(10)
                .width(Length::FillPortion(1)),
            column![text("Selection").size(16), right]
                .spacing(10)
                .width(Length::FillPortion(1)),
        ]
        .spacing(20)
        .height(Length::Fill);

        let controls = row![
            button("Open image").on_press(Message::OpenImage),
            button("Calculate").on_press(Message::Calculate),
            text(&self.result_label).size(16),
        ]
        .spacing(20)
        .align_y(iced::Alignment::Center);

        let status_bar = text(&self.status).size(14);

        container(
            column![panes, controls, status_bar]
                .spacing(20)
                .padding(20),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

fn image_display(handle: &iced_image::Handle) -> Element<'_, Message> {
    iced_image::viewer(handle.clone())
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn empty_pane(label: &str) -> Element<'_, Message> {
    container(text(label.to_string()).size(20))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_| container::Style::default().background(iced::Color::from_rgb(0.1, 0.1, 0.1)))
        .into()
}

fn rgb_handle(image: &RgbImage) -> iced_image::Handle {
    let rgba = image::DynamicImage::ImageRgb8(image.clone()).to_rgba8();
    iced_image::Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw())
}

async fn open_image() -> Option<Result<LoadedImage, LoadError>> {
    let file = rfd::AsyncFileDialog::new()
        .set_title("Select file")
        .add_filter("TIFF images", &["tif", "tiff"])
        .pick_file()
        .await?;

    let path = file.path().to_path_buf();
    let result = image::open(&path)
        .map(|decoded| LoadedImage {
            pixels: decoded.to_rgb8(),
            path: path.clone(),
        })
        .map_err(|error| LoadError {
            path,
            message: error.to_string(),
        });

    Some(result)
}

async fn show_decode_warning(error: LoadError) {
    rfd::AsyncMessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title("Warning")
        .set_description(format!(
            "Cannot open file {}: {}",
            error.path.display(),
            error.message
        ))
        .show()
        .await;
}
