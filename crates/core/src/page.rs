//! Composition root: owns every component and routes events to them.

use folio_protocol::{Severity, Target, ToastId, ViewCommand};

use crate::config::PageConfig;
use crate::contact::{ContactForm, MailHandoff};
use crate::dispatch::{DispatchTable, EventKind, Handler};
use crate::filter::PortfolioFilter;
use crate::geometry::PageGeometry;
use crate::nav::{self, MobileMenu, NavLinks};
use crate::parallax::Parallax;
use crate::preloader::Preloader;
use crate::reveal::{IntersectionEntry, RevealAnimator, RevealSpec};
use crate::slideshow::SlideSelector;
use crate::theme::{PreferenceStore, ThemeController};
use crate::threshold::ClassTrigger;
use crate::throttle::Throttled;
use crate::toast::ToastEmitter;
use crate::typing::Typewriter;

pub use crate::schedule::{Effects, TimerRequest, TimerTask};

const KEYBOARD_NAV: &str = "keyboard-navigation";
const MAIL_OPENED: &str = "Email client opened! Please send the email to complete your message.";
const SCRIPT_ERROR: &str = "Something went wrong. Please refresh the page.";

/// What the host found in the document at mount time.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    /// Section ids targeted by nav links, in link order.
    pub nav_targets: Vec<String>,
    pub reveal: Vec<RevealSpec>,
    pub slide_count: usize,
    pub shape_count: usize,
    /// `data-filter` value of each filter button.
    pub filter_buttons: Vec<String>,
    /// Category classes of each portfolio item.
    pub portfolio_items: Vec<Vec<String>>,
    pub has_subtitle: bool,
}

/// Clickable things the page reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    MobileMenuToggle,
    NavLink(String),
    ScrollTopButton,
    ThemeToggle,
    ToastClose(ToastId),
    FilterButton(String),
    NextSlide,
    PrevSlide,
    SlideDot(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Scroll,
    Resize,
    /// `in_editable` is set when focus is in a text field or other editable
    /// element, where arrow keys belong to the caret.
    KeyDown { key: String, in_editable: bool },
    MouseDown,
    Click(ClickTarget),
    /// Contact form submitted; default navigation already prevented.
    Submit(ContactForm),
    Intersection(IntersectionEntry),
    Timer(TimerRequest),
    /// Window `load`.
    Load,
    /// Uncaught script error or unhandled rejection, already logged by the host.
    ScriptError(String),
}

impl PageEvent {
    pub fn key(key: impl Into<String>) -> Self {
        Self::KeyDown {
            key: key.into(),
            in_editable: false,
        }
    }

    pub fn key_in_editable(key: impl Into<String>) -> Self {
        Self::KeyDown {
            key: key.into(),
            in_editable: true,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Scroll => EventKind::Scroll,
            Self::Resize => EventKind::Resize,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::MouseDown => EventKind::MouseDown,
            Self::Click(_) => EventKind::Click,
            Self::Submit(_) => EventKind::Submit,
            Self::Intersection(_) => EventKind::Intersection,
            Self::Timer(_) => EventKind::Timer,
            Self::Load => EventKind::Load,
            Self::ScriptError(_) => EventKind::ScriptError,
        }
    }
}

/// What the throttled scroll handler touches on an admitted call.
struct ScrollSync<'a> {
    navbar: &'a mut ClassTrigger,
    nav: &'a mut NavLinks,
    geometry: &'a dyn PageGeometry,
    lookahead: f64,
}

type ScrollSyncFn = for<'a> fn(ScrollSync<'a>) -> Vec<ViewCommand>;

fn scroll_sync(sync: ScrollSync<'_>) -> Vec<ViewCommand> {
    let mut commands: Vec<ViewCommand> = sync.navbar.update(sync.geometry.scroll_y()).into_iter().collect();
    commands.extend(sync.nav.update(sync.geometry, sync.lookahead));
    commands
}

/// All view state of one page.
pub struct Page {
    config: PageConfig,
    table: DispatchTable,
    navbar: ClassTrigger,
    scroll_top: ClassTrigger,
    nav: NavLinks,
    menu: MobileMenu,
    scroll_sync: Throttled<ScrollSyncFn>,
    parallax: Parallax,
    reveal: RevealAnimator,
    slides: SlideSelector,
    toasts: ToastEmitter,
    typing: Option<Typewriter>,
    theme: ThemeController,
    store: Box<dyn PreferenceStore>,
    filter: PortfolioFilter,
    preloader: Preloader,
    keyboard_nav: bool,
    generation: u64,
}

impl Page {
    pub fn new(config: PageConfig, layout: PageLayout, store: Box<dyn PreferenceStore>) -> Self {
        let theme = ThemeController::load(&*store, config.theme.storage_key.clone());
        let typing = layout
            .has_subtitle
            .then(|| Typewriter::new(config.typing.clone()));
        Self {
            table: DispatchTable::standard(),
            navbar: ClassTrigger::navbar(config.scroll.navbar_threshold),
            scroll_top: ClassTrigger::scroll_top_button(config.scroll.scroll_top_threshold),
            nav: NavLinks::new(layout.nav_targets),
            menu: MobileMenu::default(),
            scroll_sync: Throttled::new(scroll_sync as ScrollSyncFn, config.scroll.throttle_ms),
            parallax: Parallax::new(layout.shape_count, config.parallax),
            reveal: RevealAnimator::new(layout.reveal, config.reveal.clone(), config.counter),
            slides: SlideSelector::new(layout.slide_count),
            toasts: ToastEmitter::new(config.toast),
            typing,
            theme,
            store,
            filter: PortfolioFilter::new(layout.filter_buttons, layout.portfolio_items, config.filter),
            preloader: Preloader::new(config.preloader),
            keyboard_nav: false,
            generation: 0,
            config,
        }
    }

    pub fn nav(&self) -> &NavLinks {
        &self.nav
    }

    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    pub fn slides(&self) -> &SlideSelector {
        &self.slides
    }

    pub fn toasts(&self) -> &ToastEmitter {
        &self.toasts
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    /// Initial presentation, run once after the document is parsed.
    pub fn mount(&mut self, geometry: &dyn PageGeometry) -> Effects {
        let mut effects = Effects::from_commands(self.theme.apply());
        effects.push(ViewCommand::InsertScrollTopButton);
        if self.config.theme.show_toggle {
            effects.push(ViewCommand::InsertThemeToggle {
                icon: self.theme.theme().toggle_icon().to_string(),
            });
        }
        effects.commands.extend(self.reveal.mount());
        effects.commands.extend(self.filter.mount());
        effects.commands.extend(self.slides.show_slide(0));
        if let Some(delay) = self.typing.as_ref().and_then(Typewriter::start_delay) {
            effects.after(delay, TimerTask::TypingStep);
        }
        effects.commands.extend(self.sync_scroll(geometry));
        tracing::info!(
            sections = geometry.sections().len(),
            animated = self.reveal.observations().len(),
            slides = self.slides.count(),
            "page mounted"
        );
        self.stamp(effects)
    }

    /// Route one event through the dispatch table.
    pub fn handle(&mut self, event: &PageEvent, geometry: &dyn PageGeometry, now_ms: f64) -> Effects {
        if let PageEvent::Timer(request) = event
            && request.generation != self.generation
        {
            tracing::trace!(task = ?request.task, "dropping timer from a torn-down generation");
            return Effects::new();
        }

        let handlers: Vec<Handler> = self.table.handlers_for(event.kind()).collect();
        let mut effects = Effects::new();
        for handler in handlers {
            let produced = self.run(handler, event, geometry, now_ms);
            if !produced.is_empty() {
                tracing::trace!(%handler, commands = produced.commands.len(), "handled");
            }
            effects.merge(produced);
        }
        self.stamp(effects)
    }

    /// Cancel all pending timers. Requests issued before this call are
    /// ignored when they come back.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.reveal.cancel_counters();
        tracing::debug!(generation = self.generation, "page torn down");
    }

    fn stamp(&self, mut effects: Effects) -> Effects {
        for timer in &mut effects.timers {
            timer.generation = self.generation;
        }
        effects
    }

    fn sync_scroll(&mut self, geometry: &dyn PageGeometry) -> Vec<ViewCommand> {
        let y = geometry.scroll_y();
        let mut commands: Vec<ViewCommand> = self.navbar.update(y).into_iter().collect();
        commands.extend(self.nav.update(geometry, self.config.scroll.section_lookahead));
        commands.extend(self.scroll_top.update(y));
        commands
    }

    fn run(&mut self, handler: Handler, event: &PageEvent, geometry: &dyn PageGeometry, now_ms: f64) -> Effects {
        match (handler, event) {
            (Handler::NavbarStyle, _) => {
                Effects::from_commands(self.navbar.update(geometry.scroll_y()).into_iter().collect())
            }
            (Handler::ActiveSection, _) => {
                Effects::from_commands(self.nav.update(geometry, self.config.scroll.section_lookahead))
            }
            (Handler::ScrollTopButton, _) => {
                Effects::from_commands(self.scroll_top.update(geometry.scroll_y()).into_iter().collect())
            }
            (Handler::Parallax, _) => Effects::from_commands(self.parallax.update(geometry.scroll_y())),
            (Handler::ThrottledScrollSync, _) => {
                let sync = ScrollSync {
                    navbar: &mut self.navbar,
                    nav: &mut self.nav,
                    geometry,
                    lookahead: self.config.scroll.section_lookahead,
                };
                Effects::from_commands(self.scroll_sync.call(now_ms, sync).unwrap_or_default())
            }
            (Handler::MenuBreakpoint, _) => Effects::from_commands(
                self.menu
                    .on_resize(geometry.viewport_width(), self.config.menu.breakpoint),
            ),
            (Handler::MenuEscape, PageEvent::KeyDown { key, .. }) if key == "Escape" => {
                Effects::from_commands(self.menu.close())
            }
            (Handler::KeyboardFocus, PageEvent::KeyDown { key, .. }) if key == "Tab" && !self.keyboard_nav => {
                self.keyboard_nav = true;
                Effects::from_commands(vec![ViewCommand::add_class(Target::Body, KEYBOARD_NAV)])
            }
            (Handler::SlideKeys, PageEvent::KeyDown { key, in_editable: false }) => {
                Effects::from_commands(self.slides.on_key(key))
            }
            (Handler::PointerFocus, _) if self.keyboard_nav => {
                self.keyboard_nav = false;
                Effects::from_commands(vec![ViewCommand::remove_class(Target::Body, KEYBOARD_NAV)])
            }
            (Handler::Clicks, PageEvent::Click(target)) => self.click(target, geometry),
            (Handler::ContactSubmit, PageEvent::Submit(form)) => self.submit(form, now_ms),
            (Handler::Reveal, PageEvent::Intersection(entry)) => self.reveal.on_intersection(*entry),
            (Handler::Timers, PageEvent::Timer(request)) => self.timer(&request.task),
            (Handler::Preloader, _) => self.preloader.on_load(),
            (Handler::ErrorReport, PageEvent::ScriptError(message)) => {
                tracing::debug!(%message, notify = self.config.errors.notify_user, "script error reported");
                if self.config.errors.notify_user {
                    self.toasts.notify(SCRIPT_ERROR, Severity::Error, now_ms)
                } else {
                    Effects::new()
                }
            }
            _ => Effects::new(),
        }
    }

    fn click(&mut self, target: &ClickTarget, geometry: &dyn PageGeometry) -> Effects {
        match target {
            ClickTarget::MobileMenuToggle => Effects::from_commands(self.menu.toggle()),
            ClickTarget::NavLink(section) => {
                let mut commands = self.menu.close();
                commands.extend(nav::scroll_target(
                    geometry,
                    section,
                    self.config.scroll.navbar_offset,
                ));
                Effects::from_commands(commands)
            }
            ClickTarget::ScrollTopButton => Effects::from_commands(vec![ViewCommand::ScrollTo {
                top: 0.0,
                smooth: true,
            }]),
            ClickTarget::ThemeToggle => Effects::from_commands(self.theme.toggle(self.store.as_mut())),
            ClickTarget::ToastClose(id) => self.toasts.close(*id),
            ClickTarget::FilterButton(filter) => self.filter.select(filter),
            ClickTarget::NextSlide => Effects::from_commands(self.slides.next_slide()),
            ClickTarget::PrevSlide => Effects::from_commands(self.slides.prev_slide()),
            ClickTarget::SlideDot(index) => {
                let index = isize::try_from(*index).unwrap_or(isize::MAX);
                Effects::from_commands(self.slides.show_slide(index))
            }
        }
    }

    fn submit(&mut self, form: &ContactForm, now_ms: f64) -> Effects {
        match MailHandoff::compose(&self.config.contact.recipient, form) {
            Ok(handoff) => {
                tracing::info!(subject = %handoff.subject, "handing contact message to mail client");
                let mut effects = Effects::from_commands(vec![ViewCommand::OpenUrl {
                    url: handoff.to_uri(),
                }]);
                effects.merge(self.toasts.notify(MAIL_OPENED, Severity::Success, now_ms));
                effects.push(ViewCommand::ResetForm {
                    target: Target::ContactForm,
                });
                effects
            }
            Err(err) => {
                tracing::info!(?err, "contact form rejected");
                self.toasts.notify(err.to_string(), Severity::Error, now_ms)
            }
        }
    }

    fn timer(&mut self, task: &TimerTask) -> Effects {
        match task {
            TimerTask::TypingStep => {
                let Some(step) = self.typing.as_mut().and_then(Typewriter::tick) else {
                    return Effects::new();
                };
                let mut effects = Effects::from_commands(vec![ViewCommand::set_text(Target::Subtitle, step.text)]);
                effects.after(step.next_delay_ms, TimerTask::TypingStep);
                effects
            }
            TimerTask::CounterStep(id) => self.reveal.on_counter_step(*id),
            TimerTask::ToastEnter(id) => self.toasts.enter(*id),
            TimerTask::ToastExpire(id) => self.toasts.expire(*id),
            TimerTask::ToastRemove(id) => self.toasts.remove(*id),
            TimerTask::FilterReveal { selection, item } => self.filter.on_reveal(*selection, *item),
            TimerTask::FilterHide { selection, item } => self.filter.on_hide(*selection, *item),
            TimerTask::PreloaderFade => self.preloader.fade(),
            TimerTask::PreloaderRemove => self.preloader.remove(),
        }
    }
}
