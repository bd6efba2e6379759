//! The single HTML document shown in the webview.

pub mod assets;
pub mod behavior;

use crate::config::Settings;
use crate::paths::{encode_for_url, to_absolute, PageOrigin};
use crate::portfolio::{Portfolio, Project, Section, Skill};

use self::assets::{CSS, JS};

pub const CONTACT_ANCHOR: &str = "contacto";

pub fn build_page(portfolio: &Portfolio, settings: &Settings, origin: &PageOrigin) -> String {
    let labels = &settings.labels;

    let nav_html: String = portfolio
        .sections
        .iter()
        .filter(|s| !s.title.is_empty())
        .map(|s| format!(r##"<li><a href="#{}">{}</a></li>"##, s.slug, html_escape(&s.title)))
        .chain(std::iter::once(format!(
            r##"<li><a href="#{}">{}</a></li>"##,
            CONTACT_ANCHOR,
            html_escape(&labels.contact_title)
        )))
        .collect();

    let mut card = 0;
    let mut skill = 0;
    let sections_html: String = portfolio
        .sections
        .iter()
        .map(|section| section_html(section, settings, origin, &mut card, &mut skill))
        .collect();

    let overlay_html = if settings.intro_overlay {
        format!(
            r#"<div id="start-overlay" class="start-overlay"><h1>{}</h1><p>{}</p></div>"#,
            html_escape(&portfolio.title),
            html_escape(&labels.intro_hint)
        )
    } else {
        String::new()
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body class="{body_class}">
    {overlay}
    <div class="scroll-progress"></div>
    <nav class="navbar">
        <a class="logo" href="#top">{title}</a>
        <button class="menu-btn" aria-label="Menu">&#9776;</button>
        <ul class="nav-links">{nav}</ul>
    </nav>
    <header id="top" class="hero reveal">
        <h1>{title}</h1>
        {intro}
    </header>
    <main>
        {sections}
        {contact}
    </main>
    <button class="back-to-top" aria-label="{back_to_top}">&#8593;</button>
    <div id="project-modal" class="modal">
        <div class="modal-content">
            <span class="close-modal">&times;</span>
            <div class="modal-gallery"><div class="modal-gallery-inner"></div></div>
            <div class="modal-nav">
                <button class="modal-prev" aria-label="Anterior">&#8249;</button>
                <button class="modal-next" aria-label="Siguiente">&#8250;</button>
            </div>
            <div class="modal-indicators"></div>
        </div>
    </div>
    <script>{js}</script>
</body>
</html>"##,
        title = html_escape(&portfolio.title),
        css = CSS,
        body_class = if settings.intro_overlay { "no-scroll" } else { "" },
        overlay = overlay_html,
        nav = nav_html,
        intro = portfolio.intro_html,
        sections = sections_html,
        contact = contact_html(settings),
        back_to_top = html_escape(&labels.back_to_top),
        js = JS,
    )
}

fn section_html(
    section: &Section,
    settings: &Settings,
    origin: &PageOrigin,
    next_card: &mut usize,
    next_skill: &mut usize,
) -> String {
    let heading = if section.title.is_empty() {
        String::new()
    } else {
        format!("<h2>{}</h2>", html_escape(&section.title))
    };

    let skills = if section.skills.is_empty() {
        String::new()
    } else {
        let bars: String = section
            .skills
            .iter()
            .map(|s| {
                let html = skill_html(s, *next_skill);
                *next_skill += 1;
                html
            })
            .collect();
        format!(r#"<div class="skills">{bars}</div>"#)
    };

    let projects = if section.projects.is_empty() {
        String::new()
    } else {
        let cards: String = section
            .projects
            .iter()
            .map(|p| {
                let html = card_html(p, *next_card, settings, origin);
                *next_card += 1;
                html
            })
            .collect();
        format!(r#"<div class="projects-grid">{cards}</div>"#)
    };

    let id = if section.slug.is_empty() {
        String::new()
    } else {
        format!(r#" id="{}""#, section.slug)
    };

    format!(
        r#"<section{id} class="section reveal">{heading}{body}{skills}{projects}</section>"#,
        body = section.body_html
    )
}

fn skill_html(skill: &Skill, index: usize) -> String {
    format!(
        r#"<div class="skill"><div class="skill-info"><span>{name}</span><span>{p}%</span></div><div class="skill-bar"><div class="skill-progress" data-skill="{index}" data-progress="{p}"></div></div></div>"#,
        name = html_escape(&skill.name),
        p = skill.progress,
    )
}

fn card_html(project: &Project, card: usize, settings: &Settings, origin: &PageOrigin) -> String {
    let labels = &settings.labels;
    let img = |src: &str, alt: &str, class: &str| {
        format!(
            r#"<img src="{}" alt="{}"{}>"#,
            html_escape(&to_absolute(&encode_for_url(src), origin)),
            html_escape(alt),
            class
        )
    };

    let media = match project.images.len() {
        0 => String::new(),
        1 => {
            let only = &project.images[0];
            format!(r#"<div class="project-image">{}</div>"#, img(&only.src, &only.alt, ""))
        }
        _ => {
            let images: String = project
                .images
                .iter()
                .enumerate()
                .map(|(i, image)| img(&image.src, &image.alt, if i == 0 { r#" class="active""# } else { "" }))
                .collect();
            format!(
                r#"<div class="project-media"><div class="project-gallery">{images}</div><button class="gallery-prev" aria-label="Anterior">&#8249;</button><button class="gallery-next" aria-label="Siguiente">&#8250;</button></div>"#
            )
        }
    };

    let link = match &project.link {
        Some(link) => {
            let label = if link.label.is_empty() { &labels.view_project } else { &link.label };
            format!(
                r#"<a class="project-link" href="{}">{}</a>"#,
                html_escape(&link.url),
                html_escape(label)
            )
        }
        None => format!(
            r##"<a class="project-link" href="#">{}</a>"##,
            html_escape(&labels.view_project)
        ),
    };

    format!(
        r#"<article class="project-card reveal" data-card="{card}">{media}<div class="project-info"><h3>{title}</h3><div class="project-description" data-card="{card}">{description}</div><button class="read-more-btn" data-card="{card}" aria-expanded="false" style="display:none">{read_more}</button>{link}</div></article>"#,
        title = html_escape(&project.title),
        description = project.description_html,
        read_more = html_escape(&labels.read_more),
    )
}

fn contact_html(settings: &Settings) -> String {
    let labels = &settings.labels;
    format!(
        r#"<section id="{anchor}" class="section contact reveal">
            <h2>{title}</h2>
            <form id="contact-form" novalidate>
                <label for="name">{name}</label>
                <input type="text" id="name" name="name">
                <label for="email">{email}</label>
                <input type="email" id="email" name="email">
                <label for="message">{message}</label>
                <textarea id="message" name="message" rows="6"></textarea>
                <button type="submit" class="submit-btn">{send}</button>
            </form>
        </section>"#,
        anchor = CONTACT_ANCHOR,
        title = html_escape(&labels.contact_title),
        name = html_escape(&labels.name_label),
        email = html_escape(&labels.email_label),
        message = html_escape(&labels.message_label),
        send = html_escape(&labels.send),
    )
}

pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"# Iris & Co

Hola.

## Proyectos

### Galería

![Uno](<Img/g/Uno a.png>)
![Dos](Img/g/dos.png)

### Externo

[Demo](https://example.com)

## Habilidades

- Rust: 90
"#;

    fn page(intro: bool) -> String {
        let settings = Settings {
            intro_overlay: intro,
            ..Settings::default()
        };
        let portfolio = Portfolio::parse(SAMPLE);
        build_page(&portfolio, &settings, &PageOrigin::new("folio", "localhost"))
    }

    #[test]
    fn test_page_structure() {
        let html = page(true);
        assert!(html.contains("<title>Iris &amp; Co</title>"));
        assert!(html.contains(r#"id="project-modal""#));
        assert!(html.contains(r#"class="modal-gallery-inner""#));
        assert!(html.contains(r##"<li><a href="#proyectos">Proyectos</a></li>"##));
        assert!(html.contains(r##"<li><a href="#contacto">Contacto</a></li>"##));
        assert!(html.contains(r#"id="start-overlay""#));
        assert!(html.contains(r#"<body class="no-scroll">"#));
    }

    #[test]
    fn test_cards_and_galleries() {
        let html = page(false);
        assert!(html.contains(r#"data-card="0""#));
        assert!(html.contains(r#"<img src="folio://localhost/Img/g/Uno%20a.png" alt="Uno" class="active">"#));
        assert!(html.contains(r#"<img src="folio://localhost/Img/g/dos.png" alt="Dos">"#));
        assert!(html.contains(r#"class="gallery-prev""#));
        assert!(html.contains(r#"<a class="project-link" href="https://example.com">Demo</a>"#));
        assert!(html.contains(r##"<a class="project-link" href="#">Ver proyecto</a>"##));
        assert!(html.contains(r#"data-skill="0" data-progress="90""#));
        assert!(!html.contains("start-overlay"));
    }

    #[test]
    fn test_reveal_targets_and_anchor_lookup() {
        let html = page(false);
        assert!(html.contains(r#"<article class="project-card reveal" data-card="0">"#));
        assert!(html.contains(r#"<header id="top" class="hero reveal">"#));
        assert!(!html.contains("fade-in\""));
        assert!(JS.contains("el.classList.add('fade-in')"));
        assert!(CSS.contains(".reveal.fade-in"));
        // Ids such as "2024-proyectos" are not valid CSS selectors.
        assert!(JS.contains("document.getElementById(href.slice(1))"));
        assert!(!JS.contains("document.querySelector(href)"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
