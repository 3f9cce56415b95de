//! # Readout Display Module
//!
//! The single large frequency line and the status text underneath it.

use iced::widget::{column, container, text, Space};
use iced::{Alignment, Element, Length};

use crate::{CaptureStatus, ReadoutData};

/// Formats an estimate for display, two decimals in Hz.
pub fn format_frequency(frequency: f32) -> String {
    format!("Frequency: {frequency:.2} Hz")
}

/// One line describing the capture state.
fn status_line(data: &ReadoutData) -> String {
    match &data.status {
        CaptureStatus::Starting => "Opening microphone...".to_string(),
        CaptureStatus::Running { sample_rate, frame_size } => format!(
            "{sample_rate} Hz, {frame_size}-sample frames, {:.2} Hz per bin",
            *sample_rate as f32 / *frame_size as f32
        ),
        CaptureStatus::Failed(reason) => format!("Audio unavailable: {reason}"),
    }
}

/// Creates the complete readout view.
pub fn create_readout_view(data: &ReadoutData) -> Element<'static, crate::Message> {
    let readout = match data.frequency {
        Some(frequency) => format_frequency(frequency),
        None => "Frequency: --".to_string(),
    };

    let content = column![
        text(readout).size(48),
        Space::with_height(12),
        text(status_line(data)).size(16),
    ]
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
