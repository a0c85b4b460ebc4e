pub(crate) fn section_lookahead() -> f64 {
    100.0
}

pub(crate) fn navbar_threshold() -> f64 {
    50.0
}

pub(crate) fn scroll_top_threshold() -> f64 {
    300.0
}

pub(crate) fn scroll_throttle_ms() -> f64 {
    100.0
}

pub(crate) fn navbar_offset() -> f64 {
    70.0
}

pub(crate) fn fade_threshold() -> f64 {
    0.1
}

pub(crate) fn fade_root_margin() -> String {
    "0px 0px -50px 0px".to_string()
}

pub(crate) fn skill_threshold() -> f64 {
    0.5
}

pub(crate) fn counter_threshold() -> f64 {
    0.5
}

pub(crate) fn stagger_unit_secs() -> f64 {
    0.1
}

pub(crate) fn skill_delay_secs() -> f64 {
    0.3
}

pub(crate) fn counter_duration_ms() -> f64 {
    2000.0
}

pub(crate) fn counter_step_ms() -> f64 {
    16.0
}

pub(crate) fn toast_dismiss_ms() -> f64 {
    5000.0
}

pub(crate) fn toast_enter_ms() -> f64 {
    100.0
}

pub(crate) fn toast_exit_ms() -> f64 {
    300.0
}

pub(crate) fn typing_roles() -> Vec<String> {
    [
        "Full Stack Developer",
        "UI/UX Designer",
        "Graphic Designer",
        "Creative Problem Solver",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub(crate) fn typing_start_delay_ms() -> f64 {
    1000.0
}

pub(crate) fn typing_type_ms() -> f64 {
    100.0
}

pub(crate) fn typing_delete_ms() -> f64 {
    50.0
}

pub(crate) fn typing_word_pause_ms() -> f64 {
    2000.0
}

pub(crate) fn typing_next_word_ms() -> f64 {
    500.0
}

pub(crate) fn contact_recipient() -> String {
    "mohamed.maamar@example.com".to_string()
}

pub(crate) fn theme_storage_key() -> String {
    "theme".to_string()
}

pub(crate) fn menu_breakpoint() -> f64 {
    768.0
}

pub(crate) fn preloader_hold_ms() -> f64 {
    1000.0
}

pub(crate) fn preloader_fade_ms() -> f64 {
    500.0
}

pub(crate) fn filter_show_ms() -> f64 {
    100.0
}

pub(crate) fn filter_hide_ms() -> f64 {
    300.0
}

pub(crate) fn parallax_rate() -> f64 {
    -0.5
}

pub(crate) fn parallax_speed_unit() -> f64 {
    0.2
}

pub(crate) fn log_level() -> String {
    "info".to_string()
}
