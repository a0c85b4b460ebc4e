use crate::config::CounterConfig;

/// Numeric ramp for a stat counter, from 0 up to the value printed in the
/// element.
///
/// Each tick adds `target / (duration / step)`. Once the running value
/// reaches the target it snaps to exactly the target and the ramp is done.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterRamp {
    target: i64,
    current: f64,
    step: f64,
    plus_suffix: bool,
    done: bool,
}

impl CounterRamp {
    /// Build a ramp from the element's original display text (`"150+"`).
    pub fn from_display(text: &str, config: &CounterConfig) -> Self {
        Self::new(parse_leading_int(text), text.contains('+'), config)
    }

    pub fn new(target: i64, plus_suffix: bool, config: &CounterConfig) -> Self {
        let steps = config.duration_ms / config.step_ms;
        Self {
            target,
            current: 0.0,
            step: target as f64 / steps,
            plus_suffix,
            done: false,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance one step and return the value to display.
    ///
    /// Calling again after completion keeps returning the final value.
    pub fn tick(&mut self) -> i64 {
        if self.done {
            return self.target;
        }
        self.current += self.step;
        if self.current >= self.target as f64 {
            self.current = self.target as f64;
            self.done = true;
            self.target
        } else {
            self.current.floor() as i64
        }
    }

    /// Render a value the way the element originally formatted it.
    pub fn format(&self, value: i64) -> String {
        if self.plus_suffix {
            format!("{value}+")
        } else {
            value.to_string()
        }
    }
}

/// Leading integer of `text`, ignoring leading whitespace; `0` when there is
/// none.
fn parse_leading_int(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().map(|v| sign * v).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ramp: &mut CounterRamp) -> Vec<i64> {
        let mut values = Vec::new();
        while !ramp.is_done() {
            values.push(ramp.tick());
            assert!(values.len() < 10_000, "ramp never finished");
        }
        values
    }

    #[test]
    fn parses_display_text() {
        assert_eq!(parse_leading_int("150+"), 150);
        assert_eq!(parse_leading_int("  42 projects"), 42);
        assert_eq!(parse_leading_int("n/a"), 0);
        assert_eq!(parse_leading_int(""), 0);
    }

    #[test]
    fn converges_exactly_without_overshoot() {
        let config = CounterConfig::default();
        for target in [0, 1, 7, 50, 125, 999, 12_345] {
            let mut ramp = CounterRamp::new(target, false, &config);
            let values = run(&mut ramp);
            assert_eq!(values.last(), Some(&target), "target {target}");
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "target {target}");
            let (last, rest) = values.split_last().unwrap();
            assert_eq!(*last, target);
            assert!(rest.iter().all(|&v| v < target), "target {target}");
        }
    }

    #[test]
    fn takes_about_duration_over_step_ticks() {
        let config = CounterConfig::default();
        let mut ramp = CounterRamp::new(1000, false, &config);
        let ticks = run(&mut ramp).len();
        // 2000ms / 16ms = 125 steps, give or take float rounding.
        assert!((124..=126).contains(&ticks), "{ticks}");
    }

    #[test]
    fn keeps_plus_suffix() {
        let config = CounterConfig::default();
        let mut ramp = CounterRamp::from_display("50+", &config);
        let values = run(&mut ramp);
        assert_eq!(ramp.format(*values.last().unwrap()), "50+");

        let plain = CounterRamp::from_display("12", &config);
        assert_eq!(plain.format(12), "12");
    }

    #[test]
    fn done_ramp_is_stable() {
        let mut ramp = CounterRamp::new(3, false, &CounterConfig::default());
        run(&mut ramp);
        assert_eq!(ramp.tick(), 3);
    }
}
