use folio_protocol::{Target, ViewCommand};

use crate::config::ParallaxConfig;

const OFFSET_VAR: &str = "--parallax-y";

/// Hero background shapes drifting at increasing speeds.
///
/// Shape `i` is offset by `scroll_y * rate * (i + 1) * speed_unit` pixels,
/// published as the `--parallax-y` custom property.
#[derive(Debug, Clone)]
pub struct Parallax {
    offsets: Vec<Option<f64>>,
    config: ParallaxConfig,
}

impl Parallax {
    pub fn new(shape_count: usize, config: ParallaxConfig) -> Self {
        Self {
            offsets: vec![None; shape_count],
            config,
        }
    }

    pub fn offset(&self, index: usize, scroll_y: f64) -> f64 {
        let speed = (index + 1) as f64 * self.config.speed_unit;
        scroll_y * self.config.rate * speed
    }

    /// Commands for shapes whose offset changed since the last update.
    pub fn update(&mut self, scroll_y: f64) -> Vec<ViewCommand> {
        let mut commands = Vec::new();
        for index in 0..self.offsets.len() {
            let offset = self.offset(index, scroll_y);
            if self.offsets[index] == Some(offset) {
                continue;
            }
            self.offsets[index] = Some(offset);
            commands.push(ViewCommand::set_var(
                Target::Shape(index),
                OFFSET_VAR,
                format!("{offset}px"),
            ));
        }
        commands
    }
}
