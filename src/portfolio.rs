//! The portfolio document model, parsed from markdown.
//!
//! `#` is the page title, `##` opens a section, `###` opens a project card.
//! Images inside a card become its gallery (paths with spaces go in angle
//! brackets: `![alt](<Img/Mi foto.png>)`), the first external link becomes
//! the card link, and a list made only of `Label: 85` items becomes skill
//! bars.

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::gallery::CardLayout;
use crate::page::behavior::skill_width;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectImage {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLink {
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    pub title: String,
    pub description_html: String,
    pub images: Vec<ProjectImage>,
    pub link: Option<ProjectLink>,
}

impl Project {
    /// Raw image references, as authored.
    pub fn image_refs(&self) -> Vec<&str> {
        self.images.iter().map(|i| i.src.as_str()).collect()
    }

    pub fn layout(&self) -> CardLayout {
        let has_nav = self.images.len() > 1;
        CardLayout {
            image_count: self.images.len(),
            has_prev: has_nav,
            has_next: has_nav,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub progress: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub slug: String,
    pub body_html: String,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portfolio {
    pub title: String,
    pub intro_html: String,
    pub sections: Vec<Section>,
}

impl Portfolio {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read portfolio {}", path.display()))?;
        let portfolio = Self::parse(&content);
        info!(
            "Loaded portfolio {} ({} sections, {} projects)",
            path.display(),
            portfolio.sections.len(),
            portfolio.projects().count()
        );
        Ok(portfolio)
    }

    /// Project cards in page order; the position is the card id.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.sections.iter().flat_map(|s| s.projects.iter())
    }

    pub fn project(&self, card: usize) -> Option<&Project> {
        self.projects().nth(card)
    }

    pub fn card_layouts(&self) -> Vec<CardLayout> {
        self.projects().map(Project::layout).collect()
    }

    pub fn parse(markdown: &str) -> Self {
        let options = Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_TASKLISTS;

        let mut builder = Builder::default();
        for event in Parser::new_ext(markdown, options) {
            builder.feed(event);
        }
        builder.finish()
    }
}

/// Where body events currently go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Intro,
    Section,
    Project,
}

struct PendingList<'a> {
    events: Vec<Event<'a>>,
    items: Vec<String>,
    depth: usize,
}

struct Builder<'a> {
    portfolio: Portfolio,
    target: Target,
    body: Vec<Event<'a>>,
    heading: Option<(HeadingLevel, String)>,
    image: Option<(String, String)>,
    card_link: Option<ProjectLink>,
    list: Option<PendingList<'a>>,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self {
            portfolio: Portfolio::default(),
            target: Target::Intro,
            body: Vec::new(),
            heading: None,
            image: None,
            card_link: None,
            list: None,
        }
    }
}

impl<'a> Builder<'a> {
    fn feed(&mut self, event: Event<'a>) {
        if let Some((_, text)) = &mut self.heading {
            match event {
                Event::End(TagEnd::Heading(_)) => self.close_heading(),
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                _ => {}
            }
            return;
        }

        if let Some((_, alt)) = &mut self.image {
            match event {
                Event::End(TagEnd::Image) => self.close_image(),
                Event::Text(t) | Event::Code(t) => alt.push_str(&t),
                _ => {}
            }
            return;
        }

        if let Some(link) = &mut self.card_link {
            match event {
                Event::End(TagEnd::Link) => self.close_card_link(),
                Event::Text(t) | Event::Code(t) => link.label.push_str(&t),
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(Tag::Heading { level, .. })
                if matches!(level, HeadingLevel::H1 | HeadingLevel::H2 | HeadingLevel::H3) =>
            {
                self.flush();
                self.heading = Some((level, String::new()));
            }
            Event::Start(Tag::Image { dest_url, .. }) if self.target == Target::Project => {
                self.image = Some((dest_url.to_string(), String::new()));
            }
            Event::Start(Tag::Link { dest_url, .. })
                if self.target == Target::Project && self.wants_card_link(&dest_url) =>
            {
                self.card_link = Some(ProjectLink {
                    url: dest_url.to_string(),
                    label: String::new(),
                });
            }
            Event::Start(Tag::List(start)) if self.target == Target::Section => {
                match &mut self.list {
                    Some(list) => {
                        list.depth += 1;
                        list.events.push(Event::Start(Tag::List(start)));
                    }
                    None => {
                        self.list = Some(PendingList {
                            events: vec![Event::Start(Tag::List(start))],
                            items: Vec::new(),
                            depth: 0,
                        })
                    }
                }
            }
            event => self.push(event),
        }
    }

    fn wants_card_link(&self, url: &CowStr<'a>) -> bool {
        self.current_project().is_some_and(|p| p.link.is_none())
            && (url.starts_with("http://") || url.starts_with("https://"))
    }

    fn push(&mut self, event: Event<'a>) {
        if let Some(list) = &mut self.list {
            match &event {
                Event::Start(Tag::Item) if list.depth == 0 => list.items.push(String::new()),
                Event::Text(t) | Event::Code(t) => {
                    if let Some(item) = list.items.last_mut() {
                        item.push_str(t);
                    }
                }
                _ => {}
            }

            let ends_list = matches!(event, Event::End(TagEnd::List(_)));
            list.events.push(event);
            if ends_list {
                if list.depth == 0 {
                    self.close_list();
                } else {
                    list.depth -= 1;
                }
            }
            return;
        }

        if let Event::End(TagEnd::Paragraph) = event {
            // Paragraphs that only held images or the card link vanish.
            while matches!(self.body.last(), Some(Event::SoftBreak | Event::HardBreak)) {
                self.body.pop();
            }
            if matches!(self.body.last(), Some(Event::Start(Tag::Paragraph))) {
                self.body.pop();
                return;
            }
        }
        self.body.push(event);
    }

    fn close_heading(&mut self) {
        let Some((level, text)) = self.heading.take() else {
            return;
        };
        let text = text.trim().to_string();

        match level {
            HeadingLevel::H1 => {
                self.portfolio.title = text;
                self.target = Target::Intro;
            }
            HeadingLevel::H2 => {
                self.portfolio.sections.push(Section {
                    slug: slugify(&text),
                    title: text,
                    ..Section::default()
                });
                self.target = Target::Section;
            }
            _ => {
                if self.portfolio.sections.is_empty() {
                    self.portfolio.sections.push(Section::default());
                }
                if let Some(section) = self.portfolio.sections.last_mut() {
                    section.projects.push(Project {
                        title: text,
                        ..Project::default()
                    });
                }
                self.target = Target::Project;
            }
        }
    }

    fn close_image(&mut self) {
        let Some((src, alt)) = self.image.take() else {
            return;
        };
        if let Some(project) = self.current_project_mut() {
            debug!("project {:?}: image {src}", project.title);
            project.images.push(ProjectImage { src, alt });
        }
    }

    fn close_card_link(&mut self) {
        let Some(mut link) = self.card_link.take() else {
            return;
        };
        link.label = link.label.trim().to_string();
        if let Some(project) = self.current_project_mut() {
            project.link = Some(link);
        }
    }

    /// A finished top-level list either becomes skills or goes to the body.
    fn close_list(&mut self) {
        let Some(list) = self.list.take() else {
            return;
        };

        let skills: Option<Vec<Skill>> = if list.items.is_empty() {
            None
        } else {
            list.items.iter().map(|item| parse_skill(item)).collect()
        };

        match (skills, self.portfolio.sections.last_mut()) {
            (Some(skills), Some(section)) => section.skills.extend(skills),
            _ => self.body.extend(list.events),
        }
    }

    fn current_project(&self) -> Option<&Project> {
        if self.target != Target::Project {
            return None;
        }
        self.portfolio.sections.last()?.projects.last()
    }

    fn current_project_mut(&mut self) -> Option<&mut Project> {
        if self.target != Target::Project {
            return None;
        }
        self.portfolio.sections.last_mut()?.projects.last_mut()
    }

    /// Render buffered body events into the current target.
    fn flush(&mut self) {
        if self.list.is_some() {
            self.close_list();
        }
        if self.body.is_empty() {
            return;
        }

        let mut rendered = String::new();
        html::push_html(&mut rendered, self.body.drain(..));

        match self.target {
            Target::Intro => self.portfolio.intro_html.push_str(&rendered),
            Target::Section => {
                if let Some(section) = self.portfolio.sections.last_mut() {
                    section.body_html.push_str(&rendered);
                }
            }
            Target::Project => {
                if let Some(project) = self.current_project_mut() {
                    project.description_html.push_str(&rendered);
                }
            }
        }
    }

    fn finish(mut self) -> Portfolio {
        self.flush();
        self.portfolio
    }
}

/// `Label: 85`, `Label 85%` or `Label - 85`.
fn parse_skill(item: &str) -> Option<Skill> {
    let item = item.trim();
    let split = item.rfind(|c: char| c == ':' || c == '-' || c.is_whitespace())?;
    let (name, value) = item.split_at(split);
    let name = name.trim().trim_end_matches([':', '-']).trim();
    if name.is_empty() {
        return None;
    }
    let separator = value.chars().next().map_or(0, char::len_utf8);
    let progress = skill_width(&value[separator..])?;
    Some(Skill {
        name: name.to_string(),
        progress,
    })
}

pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
