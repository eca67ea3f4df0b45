//! SSD1306 OLED status panel
//!
//! Wraps the `ssd1306` crate in async buffered graphics mode and renders
//! the status text centred in a large font. Numbers are shown with a unit.

use core::fmt::Write;
use core::write;

use defmt::*;
use display_interface::DisplayError;
use display_interface_i2c::I2CInterface;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_hal_async::i2c::I2c;
use heapless::String;
use ssd1306::{mode::BufferedGraphicsModeAsync, prelude::*, I2CDisplayInterface, Ssd1306Async};

use pico_clock_core::state::ClockError;

use super::StatusDisplay;

/// Concrete display type used by [`OledStatus`]
type Display<I2C> =
    Ssd1306Async<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsModeAsync<DisplaySize128x64>>;

/// Text centre on the 128x64 panel
const CENTER: Point = Point::new(64, 32);

/// SSD1306 status panel
pub struct OledStatus<I2C> {
    display: Display<I2C>,
}

impl<I2C> OledStatus<I2C>
where
    I2C: I2c,
{
    /// Probe and initialise the panel at the default address (0x3C)
    ///
    /// Fails with [`ClockError::NoDisplayFound`] if nothing answers.
    pub async fn new(i2c: I2C) -> Result<Self, ClockError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        display
            .init()
            .await
            .map_err(|_| ClockError::NoDisplayFound)?;

        display.clear_buffer();
        display.flush().await.map_err(|_| ClockError::NoDisplayFound)?;

        Ok(Self { display })
    }

    async fn render(&mut self, text: &str) -> Result<(), DisplayError> {
        let character_style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        self.display.clear_buffer();
        Text::with_text_style(text, CENTER, character_style, text_style).draw(&mut self.display)?;
        self.display.flush().await
    }
}

impl<I2C> StatusDisplay for OledStatus<I2C>
where
    I2C: I2c,
{
    async fn show(&mut self, text: &str) {
        if self.render(text).await.is_err() {
            warn!("OLED refresh failed");
        }
    }

    async fn show_number(&mut self, value: u32) {
        let mut text: String<16> = String::new();
        // 10 digits plus " Hz" always fits
        let _ = write!(text, "{} Hz", value);
        self.show(&text).await;
    }
}
