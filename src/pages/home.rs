//! Landing page. Static content only.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes;

struct Service {
    icon: &'static str,
    title: &'static str,
    description: &'static str,
}

const SERVICES: [Service; 3] = [
    Service {
        icon: "🎨",
        title: "UI/UX Design",
        description: "Creating intuitive and engaging user experiences with modern design principles.",
    },
    Service {
        icon: "</>",
        title: "Front-End Development",
        description: "Building responsive and performant web applications with the latest technologies.",
    },
    Service {
        icon: "📱",
        title: "Responsive Design",
        description: "Ensuring your website looks and works perfectly on all devices.",
    },
];

// (image, title, blurb)
const FEATURED: [(&str, &str, &str); 2] = [
    (
        "https://images.unsplash.com/photo-1460925895917-afdab827c52f?auto=format&fit=crop&w=800&q=80",
        "E-Commerce Platform",
        "Modern shopping experience with React and Node.js",
    ),
    (
        "https://images.unsplash.com/photo-1555421689-491a97ff2040?auto=format&fit=crop&w=800&q=80",
        "Analytics Dashboard",
        "Data visualization with real-time updates",
    ),
];

// (quote, name, role)
const TESTIMONIALS: [(&str, &str, &str); 2] = [
    (
        "Working with FrontEndFix was an absolute pleasure. They delivered a beautiful, responsive website that exceeded our expectations.",
        "Sarah Johnson",
        "CEO, TechStart",
    ),
    (
        "The attention to detail and technical expertise shown by FrontEndFix helped us create a website that truly stands out.",
        "Michael Chen",
        "Founder, DesignLab",
    ),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page home">
            <section class="hero">
                <div class="hero-mark">"</>"</div>
                <h1 class="gradient-text">"FrontEndFix"</h1>
                <p class="lead">
                    "Transforming ideas into exceptional web experiences through modern front-end development and UI/UX design."
                </p>
                <div class="hero-actions">
                    <a href="#services" class="btn-primary pill">"Explore Services"</a>
                    <A href=routes::PORTFOLIO attr:class="btn-outline pill">"View Portfolio"</A>
                </div>
            </section>

            <section id="services" class="container">
                <SectionTitle title="Services" subtitle="Comprehensive web development solutions tailored to your needs" />
                <div class="grid three">
                    {SERVICES
                        .iter()
                        .map(|s| view! {
                            <div class="card glass">
                                <div class="card-icon">{s.icon}</div>
                                <h3>{s.title}</h3>
                                <p class="muted">{s.description}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="container">
                <SectionTitle title="Featured Projects" subtitle="A selection of my best work showcasing modern web development" />
                <div class="grid two">
                    {FEATURED
                        .iter()
                        .map(|(image, title, blurb)| view! {
                            <div class="featured">
                                <img src=*image alt=*title />
                                <div class="featured-caption">
                                    <h3>{*title}</h3>
                                    <p>{*blurb}</p>
                                </div>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="container">
                <SectionTitle title="Client Testimonials" subtitle="What clients say about working with FrontEndFix" />
                <div class="grid two">
                    {TESTIMONIALS
                        .iter()
                        .map(|(quote, name, role)| view! {
                            <div class="card glass">
                                <div class="stars">"★★★★★"</div>
                                <p class="muted">{format!("\"{}\"", quote)}</p>
                                <p class="strong">{*name}</p>
                                <p class="small muted">{*role}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>
        </div>
    }
}

#[component]
fn SectionTitle(title: &'static str, subtitle: &'static str) -> impl IntoView {
    view! {
        <div class="section-title">
            <h2>{title}</h2>
            <p class="muted">{subtitle}</p>
        </div>
    }
}
