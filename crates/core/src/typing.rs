use crate::config::TypingConfig;

/// One frame of the typewriter: text to show, then wait `next_delay_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingStep {
    pub text: String,
    pub next_delay_ms: f64,
}

/// Types each role a character at a time, holds, deletes it, moves on.
///
/// Characters are Unicode scalar values, so multi-byte roles never split
/// mid-character.
#[derive(Debug, Clone)]
pub struct Typewriter {
    roles: Vec<Vec<char>>,
    role: usize,
    chars: usize,
    deleting: bool,
    config: TypingConfig,
}

impl Typewriter {
    pub fn new(config: TypingConfig) -> Self {
        Self {
            roles: config.roles.iter().map(|r| r.chars().collect()).collect(),
            role: 0,
            chars: 0,
            deleting: false,
            config,
        }
    }

    /// Delay before the first step, or `None` when there is nothing to type.
    pub fn start_delay(&self) -> Option<f64> {
        (!self.roles.is_empty()).then_some(self.config.start_delay_ms)
    }

    pub fn tick(&mut self) -> Option<TypingStep> {
        let current = self.roles.get(self.role)?;
        let len = current.len();

        if self.deleting {
            self.chars = self.chars.saturating_sub(1);
        } else {
            self.chars = (self.chars + 1).min(len);
        }
        let text: String = current[..self.chars].iter().collect();

        let mut delay = if self.deleting {
            self.config.delete_ms
        } else {
            self.config.type_ms
        };

        if !self.deleting && self.chars == len {
            delay = self.config.word_pause_ms;
            self.deleting = true;
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.role = (self.role + 1) % self.roles.len();
            delay = self.config.next_word_ms;
        }

        Some(TypingStep {
            text,
            next_delay_ms: delay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(roles: &[&str]) -> Typewriter {
        Typewriter::new(TypingConfig {
            roles: roles.iter().map(|r| r.to_string()).collect(),
            ..TypingConfig::default()
        })
    }

    #[test]
    fn types_holds_deletes_advances() {
        let mut w = writer(&["ab", "c"]);
        assert_eq!(w.start_delay(), Some(1000.0));

        let steps: Vec<(String, f64)> = (0..8)
            .map(|_| w.tick().map(|s| (s.text, s.next_delay_ms)).unwrap())
            .collect();
        assert_eq!(
            steps,
            vec![
                ("a".into(), 100.0),
                ("ab".into(), 2000.0),
                ("a".into(), 50.0),
                ("".into(), 500.0),
                ("c".into(), 2000.0),
                ("".into(), 500.0),
                ("a".into(), 100.0),
                ("ab".into(), 2000.0),
            ]
        );
    }

    #[test]
    fn multibyte_roles_stay_whole() {
        let mut w = writer(&["héé"]);
        assert_eq!(w.tick().unwrap().text, "h");
        assert_eq!(w.tick().unwrap().text, "hé");
        assert_eq!(w.tick().unwrap().text, "héé");
    }

    #[test]
    fn no_roles_never_starts() {
        let mut w = writer(&[]);
        assert_eq!(w.start_delay(), None);
        assert!(w.tick().is_none());
    }
}
