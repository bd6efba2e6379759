pub const CSS: &str = r##"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

:root {
    --bg-primary: #0d1117;
    --bg-secondary: #161b22;
    --bg-tertiary: #21262d;
    --text-primary: #e6edf3;
    --text-secondary: #8b949e;
    --border-color: #30363d;
    --accent-color: #58a6ff;
    --error-color: #f85149;
}

html {
    scroll-behavior: smooth;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
    line-height: 1.6;
    font-size: 15px;
}

body.no-scroll {
    overflow: hidden;
}

a {
    color: var(--accent-color);
    text-decoration: none;
}

.scroll-progress {
    position: fixed;
    top: 0;
    left: 0;
    height: 3px;
    width: 0;
    background: var(--accent-color);
    z-index: 1001;
}

.navbar {
    position: fixed;
    top: 0;
    left: 0;
    right: 0;
    height: 64px;
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0 32px;
    z-index: 1000;
    transition: background 0.3s ease, box-shadow 0.3s ease;
}

.navbar.scrolled {
    background: var(--bg-secondary);
    box-shadow: 0 1px 0 var(--border-color);
}

.navbar .logo {
    font-weight: 600;
    color: var(--text-primary);
}

.nav-links {
    display: flex;
    gap: 24px;
    list-style: none;
}

.nav-links a {
    color: var(--text-secondary);
}

.nav-links a:hover {
    color: var(--text-primary);
}

.menu-btn {
    display: none;
    background: none;
    border: none;
    color: var(--text-primary);
    font-size: 22px;
    cursor: pointer;
}

@media (max-width: 720px) {
    .menu-btn {
        display: block;
    }
    .nav-links {
        display: none;
        position: absolute;
        top: 64px;
        left: 0;
        right: 0;
        flex-direction: column;
        padding: 16px 32px;
        background: var(--bg-secondary);
    }
    .nav-links.active {
        display: flex;
    }
}

.hero {
    padding: 140px 32px 64px;
    max-width: 960px;
    margin: 0 auto;
}

.hero h1 {
    font-size: 42px;
    margin-bottom: 16px;
}

.section {
    padding: 64px 32px;
    max-width: 960px;
    margin: 0 auto;
}

.section h2 {
    font-size: 26px;
    margin-bottom: 24px;
    padding-bottom: 8px;
    border-bottom: 1px solid var(--border-color);
}

.reveal {
    opacity: 0;
    transform: translateY(16px);
    transition: opacity 0.6s ease, transform 0.6s ease;
}

.reveal.fade-in {
    opacity: 1;
    transform: none;
}

.projects-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
    gap: 24px;
}

.project-card {
    background: var(--bg-secondary);
    border: 1px solid var(--border-color);
    border-radius: 8px;
    overflow: hidden;
}

.project-media {
    position: relative;
}

.project-gallery,
.project-image {
    position: relative;
    height: 200px;
    background: #1a1a1a;
}

.project-gallery img,
.project-image img {
    width: 100%;
    height: 100%;
    object-fit: cover;
}

.project-gallery img {
    position: absolute;
    inset: 0;
    opacity: 0;
    transition: opacity 0.5s ease;
}

.project-gallery img.active {
    opacity: 1;
}

.gallery-prev,
.gallery-next {
    position: absolute;
    top: 50%;
    transform: translateY(-50%);
    background: rgba(0, 0, 0, 0.5);
    color: #fff;
    border: none;
    width: 32px;
    height: 32px;
    border-radius: 50%;
    cursor: pointer;
}

.gallery-prev { left: 8px; }
.gallery-next { right: 8px; }

.project-info {
    padding: 16px;
}

.project-info h3 {
    margin-bottom: 8px;
}

.project-description {
    color: var(--text-secondary);
    transition: max-height 0.4s ease;
}

.project-description p + p {
    margin-top: 8px;
}

.read-more-btn {
    margin-top: 8px;
    background: none;
    border: none;
    color: var(--accent-color);
    font-weight: 600;
    cursor: pointer;
}

.project-link {
    display: inline-block;
    margin-top: 12px;
    padding: 6px 14px;
    border: 1px solid var(--accent-color);
    border-radius: 4px;
}

.skills {
    display: grid;
    gap: 16px;
}

.skill-info {
    display: flex;
    justify-content: space-between;
    margin-bottom: 4px;
}

.skill-bar {
    height: 8px;
    background: var(--bg-tertiary);
    border-radius: 4px;
    overflow: hidden;
}

.skill-progress {
    width: 0;
    height: 100%;
    background: var(--accent-color);
    transition: width 1s ease;
}

#contact-form {
    display: grid;
    gap: 8px;
    max-width: 560px;
}

#contact-form input,
#contact-form textarea {
    background: var(--bg-secondary);
    border: 1px solid var(--border-color);
    border-radius: 4px;
    color: var(--text-primary);
    padding: 8px 10px;
    font: inherit;
}

#contact-form .error {
    border-color: var(--error-color);
}

.submit-btn {
    margin-top: 8px;
    padding: 10px;
    background: var(--accent-color);
    color: #0d1117;
    border: none;
    border-radius: 4px;
    font-weight: 600;
    cursor: pointer;
    transition: background-color 0.3s ease;
}

.back-to-top {
    position: fixed;
    right: 24px;
    bottom: 24px;
    width: 40px;
    height: 40px;
    border-radius: 50%;
    border: 1px solid var(--border-color);
    background: var(--bg-secondary);
    color: var(--text-primary);
    cursor: pointer;
    opacity: 0;
    pointer-events: none;
    transition: opacity 0.3s ease;
}

.back-to-top.show {
    opacity: 1;
    pointer-events: auto;
}

.modal {
    display: none;
    position: fixed;
    inset: 0;
    background: rgba(0, 0, 0, 0.85);
    z-index: 2000;
    align-items: center;
    justify-content: center;
}

.modal.open {
    display: flex;
}

.modal-content {
    position: relative;
    width: min(90vw, 1100px);
    height: min(80vh, 760px);
}

.close-modal {
    position: absolute;
    top: -36px;
    right: 0;
    font-size: 30px;
    color: #fff;
    cursor: pointer;
}

.modal-gallery {
    width: 100%;
    height: 100%;
    overflow: hidden;
}

.modal-gallery-inner {
    display: flex;
    height: 100%;
    transition: transform 0.4s ease;
}

.modal-gallery-inner img {
    flex: 0 0 100%;
    display: block;
    width: 100%;
    height: 100%;
    object-fit: contain;
    opacity: 0;
    transition: opacity 0.3s ease;
    background-color: #1a1a1a;
}

.modal-prev,
.modal-next {
    position: absolute;
    top: 50%;
    transform: translateY(-50%);
    background: rgba(255, 255, 255, 0.1);
    color: #fff;
    border: none;
    font-size: 32px;
    width: 48px;
    height: 48px;
    border-radius: 50%;
    cursor: pointer;
}

.modal-prev { left: -60px; }
.modal-next { right: -60px; }

.modal-indicators {
    position: absolute;
    bottom: -28px;
    left: 0;
    right: 0;
    display: flex;
    justify-content: center;
    gap: 8px;
}

.modal-indicator {
    width: 10px;
    height: 10px;
    border-radius: 50%;
    background: rgba(255, 255, 255, 0.3);
    cursor: pointer;
}

.modal-indicator.active {
    background: #fff;
}

.hidden {
    display: none !important;
}

.start-overlay {
    position: fixed;
    inset: 0;
    z-index: 3000;
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    gap: 12px;
    background: var(--bg-primary);
    transition: opacity 0.5s ease;
}

.start-overlay p {
    color: var(--text-secondary);
}
"##;

pub const JS: &str = r##"
const post = (msg) => {
    if (window.ipc) window.ipc.postMessage(JSON.stringify(msg));
};

const modal = document.getElementById('project-modal');
const modalInner = modal.querySelector('.modal-gallery-inner');
const modalNav = modal.querySelector('.modal-nav');
const modalIndicators = modal.querySelector('.modal-indicators');
const progressBar = document.querySelector('.scroll-progress');
const contactForm = document.getElementById('contact-form');
const submitBtn = contactForm.querySelector('.submit-btn');
const fadeTargets = Array.from(document.querySelectorAll('.reveal'));

const cardOf = (el) => parseInt(el.closest('[data-card]').dataset.card, 10);
const descriptionOf = (card) => document.querySelector('.project-description[data-card="' + card + '"]');
const readMoreOf = (card) => document.querySelector('.read-more-btn[data-card="' + card + '"]');

window.folio = {
    modal: {
        show(open) {
            modal.classList.toggle('open', open);
            document.body.style.overflow = open ? 'hidden' : '';
        },
        mount(generation, slot, src, alt) {
            const img = document.createElement('img');
            img.alt = alt;
            img.loading = 'eager';
            img.dataset.slot = slot;
            img.dataset.originalSrc = src;
            img.onload = () => post({ type: 'image_loaded', generation, slot });
            img.onerror = () => post({ type: 'image_failed', generation, slot });
            img.src = src;
            modalInner.appendChild(img);
        },
        image(slot) {
            return modalInner.querySelector('img[data-slot="' + slot + '"]');
        },
        loaded(slot) {
            const img = this.image(slot);
            if (!img) return;
            img.style.opacity = '1';
            img.style.filter = 'none';
        },
        failed(slot, placeholder, alt, tooltip) {
            const img = this.image(slot);
            if (!img) return;
            img.onerror = null;
            img.onload = null;
            img.src = placeholder;
            img.alt = alt;
            img.title = tooltip;
            img.style.opacity = '1';
            img.style.filter = 'grayscale(100%) opacity(0.5)';
        },
        offset(percent) {
            modalInner.style.transform = 'translateX(' + percent + '%)';
        },
        indicators(count, active) {
            modalIndicators.innerHTML = '';
            for (let i = 0; i < count; i++) {
                const dot = document.createElement('div');
                dot.className = 'modal-indicator' + (i === active ? ' active' : '');
                dot.addEventListener('click', (e) => {
                    e.stopPropagation();
                    post({ type: 'modal_goto', index: i });
                });
                modalIndicators.appendChild(dot);
            }
        },
        controlsHidden(hidden) {
            modalNav.classList.toggle('hidden', hidden);
            modalIndicators.classList.toggle('hidden', hidden);
        },
        clear() {
            modalInner.querySelectorAll('img').forEach((img) => {
                img.onload = null;
                img.onerror = null;
            });
            modalInner.innerHTML = '';
            modalIndicators.innerHTML = '';
        },
    },
    gallery: {
        show(card, active) {
            const gallery = document.querySelector('.project-card[data-card="' + card + '"] .project-gallery');
            if (!gallery) return;
            gallery.querySelectorAll('img').forEach((img, i) => img.classList.toggle('active', i === active));
        },
    },
    page: {
        progress(percent) {
            progressBar.style.width = percent + '%';
        },
        toggle(selector, cls, on) {
            const el = document.querySelector(selector);
            if (el) el.classList.toggle(cls, on);
        },
        scrollTo(top) {
            window.scrollTo({ top, behavior: 'smooth' });
        },
        reveal(index) {
            const el = fadeTargets[index];
            if (el) el.classList.add('fade-in');
        },
        skill(index, percent) {
            const bar = document.querySelector('.skill-progress[data-skill="' + index + '"]');
            if (bar) bar.style.width = percent + '%';
        },
    },
    readMore: {
        clamp(card, maxHeight) {
            const desc = descriptionOf(card);
            const btn = readMoreOf(card);
            if (!desc || !btn) return;
            desc.style.maxHeight = maxHeight + 'px';
            desc.style.overflow = 'hidden';
            btn.style.display = '';
        },
        hide(card) {
            const btn = readMoreOf(card);
            if (btn) btn.style.display = 'none';
        },
        set(card, maxHeight, expanded, label) {
            const desc = descriptionOf(card);
            const btn = readMoreOf(card);
            if (!desc || !btn) return;
            desc.classList.toggle('expanded', expanded);
            desc.style.maxHeight = maxHeight + 'px';
            btn.textContent = label;
            btn.setAttribute('aria-expanded', String(expanded));
        },
    },
    form: {
        mark(id, error) {
            const input = document.getElementById(id);
            if (input) input.classList.toggle('error', error);
        },
        sending(label) {
            submitBtn.dataset.label = submitBtn.textContent;
            submitBtn.textContent = label;
            submitBtn.style.backgroundColor = '#28a745';
        },
        restore() {
            if (submitBtn.dataset.label) submitBtn.textContent = submitBtn.dataset.label;
            submitBtn.style.backgroundColor = '';
        },
        done(message) {
            setTimeout(() => {
                alert(message);
                contactForm.reset();
                window.folio.form.restore();
            }, 500);
        },
        notice(message) {
            alert(message);
            window.folio.form.restore();
        },
    },
    intro: {
        hide() {
            const overlay = document.getElementById('start-overlay');
            if (overlay) overlay.classList.add('hidden');
            document.body.classList.remove('no-scroll');
        },
    },
};

// Modal
modal.querySelector('.modal-prev').addEventListener('click', (e) => {
    e.stopPropagation();
    post({ type: 'modal_prev' });
});
modal.querySelector('.modal-next').addEventListener('click', (e) => {
    e.stopPropagation();
    post({ type: 'modal_next' });
});
modal.querySelector('.close-modal').addEventListener('click', (e) => {
    e.stopPropagation();
    post({ type: 'modal_close' });
});
modal.addEventListener('click', (e) => {
    if (e.target === modal) post({ type: 'modal_backdrop' });
});

// Keyboard
document.addEventListener('keydown', (e) => {
    if (e.metaKey && e.key === 'w') {
        e.preventDefault();
        post({ type: 'close_window' });
        return;
    }
    if (e.metaKey && e.key === 'q') {
        e.preventDefault();
        post({ type: 'quit_app' });
        return;
    }
    if (e.key === 'Escape' || e.key === 'ArrowLeft' || e.key === 'ArrowRight') {
        post({ type: 'key', key: e.key });
    }
});

// Intro overlay: the first input of any kind dismisses it
if (document.getElementById('start-overlay')) {
    const dismiss = () => {
        post({ type: 'intro_dismiss' });
        document.removeEventListener('click', dismiss, true);
        document.removeEventListener('keydown', dismiss, true);
        document.removeEventListener('touchstart', dismiss, true);
    };
    document.addEventListener('click', dismiss, true);
    document.addEventListener('keydown', dismiss, true);
    document.addEventListener('touchstart', dismiss, true);
}

// Project cards
document.querySelectorAll('.project-card .project-link').forEach((link) => {
    link.addEventListener('click', (e) => {
        if (link.getAttribute('href') !== '#') return;
        e.preventDefault();
        post({ type: 'open_project', card: cardOf(link) });
    });
});
document.querySelectorAll('a[href^="http://"], a[href^="https://"]').forEach((link) => {
    link.addEventListener('click', (e) => {
        e.preventDefault();
        post({ type: 'external_link', url: link.href });
    });
});
document.querySelectorAll('.gallery-prev').forEach((btn) => {
    btn.addEventListener('click', () => post({ type: 'gallery_prev', card: cardOf(btn) }));
});
document.querySelectorAll('.gallery-next').forEach((btn) => {
    btn.addEventListener('click', () => post({ type: 'gallery_next', card: cardOf(btn) }));
});
document.querySelectorAll('.read-more-btn').forEach((btn) => {
    btn.addEventListener('click', () => {
        const card = cardOf(btn);
        post({ type: 'read_more_toggle', card, height: descriptionOf(card).scrollHeight });
    });
});

// Navigation
document.querySelector('.menu-btn').addEventListener('click', () => post({ type: 'menu_toggle' }));
document.querySelectorAll('.nav-links a').forEach((link) => {
    link.addEventListener('click', () => post({ type: 'menu_link' }));
});
document.querySelectorAll('a[href^="#"]:not(.project-link)').forEach((anchor) => {
    anchor.addEventListener('click', (e) => {
        const href = anchor.getAttribute('href');
        if (!href || href === '#') return;
        e.preventDefault();
        const target = document.getElementById(href.slice(1));
        if (!target) return;
        post({
            type: 'anchor',
            href,
            element_top: target.getBoundingClientRect().top,
            page_offset: window.pageYOffset,
        });
    });
});
document.querySelector('.back-to-top').addEventListener('click', () => post({ type: 'back_to_top' }));

// Scroll
let scrollQueued = false;
const reportScroll = () => {
    scrollQueued = false;
    const root = document.documentElement;
    post({
        type: 'scroll',
        top: document.body.scrollTop || root.scrollTop,
        scroll_height: root.scrollHeight,
        client_height: root.clientHeight,
    });
};
window.addEventListener('scroll', () => {
    if (scrollQueued) return;
    scrollQueued = true;
    requestAnimationFrame(reportScroll);
});

// Reveal on intersect
const observer = new IntersectionObserver((entries) => {
    entries.forEach((entry) => {
        if (!entry.isIntersecting) return;
        const el = entry.target;
        const bar = el.querySelector('.skill-progress');
        if (el.classList.contains('skill-bar') && bar) {
            post({ type: 'reveal', kind: 'skill', index: parseInt(bar.dataset.skill, 10), progress: bar.dataset.progress || '' });
        } else {
            post({ type: 'reveal', kind: 'fade', index: fadeTargets.indexOf(el) });
        }
        observer.unobserve(el);
    });
}, { threshold: 0.1 });
document.querySelectorAll('.reveal, .skill-bar').forEach((el) => observer.observe(el));

// Contact form
contactForm.querySelectorAll('input, textarea').forEach((input) => {
    input.addEventListener('blur', () => post({ type: 'field_blur', field: input.id, value: input.value }));
    input.addEventListener('input', () => {
        if (!input.classList.contains('error')) return;
        post({ type: 'field_input', field: input.id, value: input.value, had_error: true });
    });
});
contactForm.addEventListener('submit', (e) => {
    e.preventDefault();
    post({
        type: 'submit',
        name: document.getElementById('name').value,
        email: document.getElementById('email').value,
        message: document.getElementById('message').value,
    });
});

document.addEventListener('DOMContentLoaded', () => {
    // Defer measurement until layout
    setTimeout(() => {
        document.querySelectorAll('.project-description').forEach((desc) => {
            post({ type: 'read_more_measured', card: cardOf(desc), height: desc.scrollHeight });
        });
    }, 0);
    reportScroll();
});
"##;
