//! Element registry: finds the page's elements once at mount, maps
//! [`Target`]s back to them, and applies [`ViewCommand`]s.

use std::collections::HashMap;

use folio_core::contact::{ContactForm, Field};
use folio_core::page::{ClickTarget, PageLayout};
use folio_core::reveal::RevealSpec;
use folio_protocol::{ElementId, Target, ToastId, ViewCommand};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    ScrollBehavior, ScrollToOptions, Window,
};

use crate::errors::FolioError;
use crate::selectors::{Selectors, created, parse_section_href, parse_slide_index};

pub struct Dom {
    window: Window,
    document: Document,
    selectors: Selectors,
    root: Element,
    body: HtmlElement,
    navbar: Option<Element>,
    nav_menu: Option<Element>,
    mobile_menu: Option<Element>,
    nav_links: Vec<(String, Element)>,
    sections: Vec<(String, HtmlElement)>,
    contact_form: Option<HtmlFormElement>,
    subtitle: Option<Element>,
    preloader: Option<Element>,
    /// Indexed by [`ElementId`].
    reveal: Vec<Element>,
    slides: Vec<Element>,
    shapes: Vec<Element>,
    filter_buttons: Vec<(String, Element)>,
    portfolio_items: Vec<Element>,
    scroll_top: Option<Element>,
    theme_toggle: Option<Element>,
    toasts: HashMap<ToastId, Element>,
}

impl Dom {
    /// Find every element named by `selectors` and describe them for the core.
    pub fn scan(window: Window, selectors: Selectors) -> Result<(Self, PageLayout), FolioError> {
        let document = window.document().ok_or(FolioError::MissingElement("document"))?;
        let root = document
            .document_element()
            .ok_or(FolioError::MissingElement("root element"))?;
        let body = document.body().ok_or(FolioError::MissingElement("body"))?;

        let nav_links: Vec<(String, Element)> = query_all(&document, &selectors.nav_link)?
            .into_iter()
            .filter_map(|link| {
                let href = link.get_attribute("href")?;
                let id = parse_section_href(&href)?.to_string();
                Some((id, link))
            })
            .collect();

        let sections: Vec<(String, HtmlElement)> = query_all(&document, &selectors.section)?
            .into_iter()
            .filter_map(|el| {
                let el = el.dyn_into::<HtmlElement>().ok()?;
                Some((el.id(), el))
            })
            .collect();

        let mut reveal = Vec::new();
        let mut specs = Vec::new();
        for el in query_all(&document, &selectors.fade)? {
            let id = next_id(&reveal);
            let spec = if el.matches(&selectors.stagger)? {
                RevealSpec::staggered(id, sibling_index(&el))
            } else {
                RevealSpec::fade(id)
            };
            specs.push(spec);
            reveal.push(el);
        }
        for el in query_all(&document, &selectors.skill_item)? {
            specs.push(RevealSpec::skill_bar(next_id(&reveal)));
            reveal.push(el);
        }
        for el in query_all(&document, &selectors.counter)? {
            let text = el.text_content().unwrap_or_default();
            specs.push(RevealSpec::counter(next_id(&reveal), text.trim()));
            reveal.push(el);
        }

        let filter_buttons: Vec<(String, Element)> = query_all(&document, &selectors.filter_button)?
            .into_iter()
            .filter_map(|el| Some((el.get_attribute("data-filter")?, el)))
            .collect();
        let portfolio_items = query_all(&document, &selectors.portfolio_item)?;
        let item_classes: Vec<Vec<String>> = portfolio_items
            .iter()
            .map(|el| el.class_name().split_whitespace().map(String::from).collect())
            .collect();

        let preloader = match document.query_selector(&selectors.preloader)? {
            Some(el) => el,
            None => create_preloader(&document, &body)?,
        };

        let dom = Self {
            navbar: document.query_selector(&selectors.navbar)?,
            nav_menu: document.query_selector(&selectors.nav_menu)?,
            mobile_menu: document.query_selector(&selectors.mobile_menu)?,
            contact_form: document
                .query_selector(&selectors.contact_form)?
                .and_then(|el| el.dyn_into::<HtmlFormElement>().ok()),
            subtitle: document.query_selector(&selectors.subtitle)?,
            slides: query_all(&document, &selectors.slide)?,
            shapes: query_all(&document, &selectors.shape)?,
            preloader: Some(preloader),
            scroll_top: None,
            theme_toggle: None,
            toasts: HashMap::new(),
            window,
            document,
            root,
            body,
            nav_links,
            sections,
            reveal,
            filter_buttons,
            portfolio_items,
            selectors,
        };

        let layout = PageLayout {
            nav_targets: dom.nav_links.iter().map(|(id, _)| id.clone()).collect(),
            reveal: specs,
            slide_count: dom.slides.len(),
            shape_count: dom.shapes.len(),
            filter_buttons: dom.filter_buttons.iter().map(|(f, _)| f.clone()).collect(),
            portfolio_items: item_classes,
            has_subtitle: dom.subtitle.is_some(),
        };
        tracing::debug!(
            links = dom.nav_links.len(),
            sections = dom.sections.len(),
            animated = dom.reveal.len(),
            slides = dom.slides.len(),
            "document scanned"
        );
        Ok((dom, layout))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn contact_form(&self) -> Option<&HtmlFormElement> {
        self.contact_form.as_ref()
    }

    pub fn sections(&self) -> &[(String, HtmlElement)] {
        &self.sections
    }

    pub fn reveal_element(&self, id: ElementId) -> Option<&Element> {
        self.reveal.get(id.0 as usize)
    }

    /// Id of an observed element, if it is one of ours.
    pub fn reveal_id(&self, el: &Element) -> Option<ElementId> {
        let el: &JsValue = el.as_ref();
        self.reveal
            .iter()
            .position(|candidate| AsRef::<JsValue>::as_ref(candidate) == el)
            .and_then(|index| u32::try_from(index).ok())
            .map(ElementId)
    }

    /// Map a click to what it means, looking at the nearest matching ancestor.
    pub fn classify_click(&self, el: &Element) -> Result<Option<ClickTarget>, FolioError> {
        let s = &self.selectors;
        let close = format!(".{}", created::TOAST_CLOSE);
        if let Some(button) = el.closest(&close)? {
            let id = button
                .get_attribute(created::TOAST_ID_ATTR)
                .and_then(|v| v.parse().ok())
                .map(ToastId);
            return Ok(id.map(ClickTarget::ToastClose));
        }
        if el.closest(&s.mobile_menu)?.is_some() {
            return Ok(Some(ClickTarget::MobileMenuToggle));
        }
        if let Some(link) = el.closest(&s.nav_link)? {
            let id = link
                .get_attribute("href")
                .as_deref()
                .and_then(parse_section_href)
                .map(String::from);
            return Ok(id.map(ClickTarget::NavLink));
        }
        if el.closest(&format!(".{}", created::SCROLL_TOP))?.is_some() {
            return Ok(Some(ClickTarget::ScrollTopButton));
        }
        if el.closest(&format!(".{}", created::THEME_TOGGLE))?.is_some() {
            return Ok(Some(ClickTarget::ThemeToggle));
        }
        if let Some(button) = el.closest(&s.filter_button)? {
            return Ok(button.get_attribute("data-filter").map(ClickTarget::FilterButton));
        }
        if el.closest(&s.slide_next)?.is_some() {
            return Ok(Some(ClickTarget::NextSlide));
        }
        if el.closest(&s.slide_prev)?.is_some() {
            return Ok(Some(ClickTarget::PrevSlide));
        }
        if let Some(dot) = el.closest(&s.slide_dot)? {
            let index = dot
                .get_attribute("data-slide-to")
                .as_deref()
                .and_then(parse_slide_index);
            return Ok(index.map(ClickTarget::SlideDot));
        }
        Ok(None)
    }

    /// Current values of the contact form's four fields.
    pub fn read_contact_form(&self) -> Result<ContactForm, FolioError> {
        let form = self
            .contact_form
            .as_ref()
            .ok_or(FolioError::MissingElement("contact form"))?;
        let value = |field: Field| -> Result<String, FolioError> {
            Ok(field_value(form, field.name())?.unwrap_or_default())
        };
        Ok(ContactForm::new(
            value(Field::Name)?,
            value(Field::Email)?,
            value(Field::Subject)?,
            value(Field::Message)?,
        ))
    }

    fn element(&self, target: &Target) -> Option<Element> {
        let found = match target {
            Target::Root => Some(self.root.clone()),
            Target::Body => Some(self.body.clone().into()),
            Target::Navbar => self.navbar.clone(),
            Target::NavMenu => self.nav_menu.clone(),
            Target::MobileMenuToggle => self.mobile_menu.clone(),
            Target::NavLink(section) => self
                .nav_links
                .iter()
                .find(|(id, _)| id == section)
                .map(|(_, el)| el.clone()),
            Target::ScrollTopButton => self.scroll_top.clone(),
            Target::ThemeToggle => self.theme_toggle.clone(),
            Target::Preloader => self.preloader.clone(),
            Target::Subtitle => self.subtitle.clone(),
            Target::ContactForm => self.contact_form.clone().map(Into::into),
            Target::Element(id) => self.reveal_element(*id).cloned(),
            Target::Slide(i) => self.slides.get(*i).cloned(),
            Target::Shape(i) => self.shapes.get(*i).cloned(),
            Target::FilterButton(filter) => self
                .filter_buttons
                .iter()
                .find(|(f, _)| f == filter)
                .map(|(_, el)| el.clone()),
            Target::PortfolioItem(i) => self.portfolio_items.get(*i).cloned(),
            Target::Toast(id) => self.toasts.get(id).cloned(),
        };
        if found.is_none() {
            tracing::debug!(?target, "no element for target, skipping");
        }
        found
    }

    fn html_element(&self, target: &Target) -> Option<HtmlElement> {
        self.element(target)?.dyn_into::<HtmlElement>().ok()
    }

    /// Apply one command. `Unobserve` belongs to the observers and is ignored here.
    pub fn apply(&mut self, command: &ViewCommand) -> Result<(), FolioError> {
        match command {
            ViewCommand::AddClass { target, class } => {
                if let Some(el) = self.element(target) {
                    el.class_list().add_1(class)?;
                }
            }
            ViewCommand::RemoveClass { target, class } => {
                if let Some(el) = self.element(target) {
                    el.class_list().remove_1(class)?;
                }
            }
            ViewCommand::SetText { target, text } => {
                if let Some(el) = self.element(target) {
                    el.set_text_content(Some(text));
                }
            }
            ViewCommand::SetAttribute { target, name, value } => {
                if let Some(el) = self.element(target) {
                    el.set_attribute(name, value)?;
                }
            }
            ViewCommand::SetVar { target, name, value } => {
                if let Some(el) = self.html_element(target) {
                    el.style().set_property(name, value)?;
                }
            }
            ViewCommand::Show { target } => {
                if let Some(el) = self.html_element(target) {
                    el.set_hidden(false);
                }
            }
            ViewCommand::Hide { target } => {
                if let Some(el) = self.html_element(target) {
                    el.set_hidden(true);
                }
            }
            ViewCommand::Remove { target } => {
                if let Some(el) = self.element(target) {
                    el.remove();
                }
                self.forget(target);
            }
            ViewCommand::InsertToast { id, text, severity } => {
                let toast = self.create(
                    "div",
                    &format!("{} {}", created::TOAST, severity.class_name()),
                )?;
                toast.set_attribute("role", "status")?;
                let content = self.create("div", created::TOAST_CONTENT)?;
                let message = self.create("span", created::TOAST_MESSAGE)?;
                message.set_text_content(Some(text));
                let close = self.create("button", created::TOAST_CLOSE)?;
                close.set_attribute("type", "button")?;
                close.set_attribute("aria-label", "Close notification")?;
                close.set_attribute(created::TOAST_ID_ATTR, &id.0.to_string())?;
                close.set_text_content(Some("\u{d7}"));
                content.append_child(&message)?;
                content.append_child(&close)?;
                toast.append_child(&content)?;
                self.body.append_child(&toast)?;
                self.toasts.insert(*id, toast);
            }
            ViewCommand::InsertScrollTopButton => {
                let button = self.create("button", created::SCROLL_TOP)?;
                button.set_attribute("type", "button")?;
                button.set_attribute("aria-label", "Scroll to top")?;
                self.body.append_child(&button)?;
                self.scroll_top = Some(button);
            }
            ViewCommand::InsertThemeToggle { icon } => {
                let button = self.create("button", created::THEME_TOGGLE)?;
                button.set_attribute("type", "button")?;
                button.set_attribute("aria-label", "Toggle dark mode")?;
                button.set_attribute("data-icon", icon)?;
                self.body.append_child(&button)?;
                self.theme_toggle = Some(button);
            }
            ViewCommand::Unobserve { .. } => {}
            ViewCommand::ScrollTo { top, smooth } => {
                let options = ScrollToOptions::new();
                options.set_top(*top);
                options.set_behavior(if *smooth {
                    ScrollBehavior::Smooth
                } else {
                    ScrollBehavior::Auto
                });
                self.window.scroll_to_with_scroll_to_options(&options);
            }
            ViewCommand::OpenUrl { url } => {
                self.window.location().set_href(url)?;
            }
            ViewCommand::ResetForm { target } => match target {
                Target::ContactForm => {
                    if let Some(form) = &self.contact_form {
                        form.reset();
                    }
                }
                other => tracing::debug!(target = ?other, "reset on a non-form target"),
            },
        }
        Ok(())
    }

    fn forget(&mut self, target: &Target) {
        match target {
            Target::Toast(id) => {
                self.toasts.remove(id);
            }
            Target::Preloader => self.preloader = None,
            Target::ScrollTopButton => self.scroll_top = None,
            Target::ThemeToggle => self.theme_toggle = None,
            _ => {}
        }
    }

    fn create(&self, tag: &str, class: &str) -> Result<Element, FolioError> {
        let el = self.document.create_element(tag)?;
        el.set_class_name(class);
        Ok(el)
    }
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, FolioError> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn next_id(registered: &[Element]) -> u32 {
    u32::try_from(registered.len()).unwrap_or(u32::MAX)
}

/// Position among the parent's element children.
fn sibling_index(el: &Element) -> usize {
    let mut index = 0;
    let mut cursor = el.previous_element_sibling();
    while let Some(prev) = cursor {
        index += 1;
        cursor = prev.previous_element_sibling();
    }
    index
}

fn field_value(form: &HtmlFormElement, name: &str) -> Result<Option<String>, FolioError> {
    let Some(el) = form.query_selector(&format!("[name=\"{name}\"]"))? else {
        tracing::debug!(field = name, "contact field missing");
        return Ok(None);
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Ok(Some(input.value()));
    }
    Ok(el.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value))
}

fn create_preloader(document: &Document, body: &HtmlElement) -> Result<Element, FolioError> {
    let preloader = document.create_element("div")?;
    preloader.set_class_name(created::PRELOADER);
    let content = document.create_element("div")?;
    content.set_class_name("preloader-content");
    let spinner = document.create_element("div")?;
    spinner.set_class_name("spinner");
    content.append_child(&spinner)?;
    preloader.append_child(&content)?;
    body.append_child(&preloader)?;
    Ok(preloader)
}
