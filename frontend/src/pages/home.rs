use yew::prelude::*;

use crate::carousel::{CarouselConfig, CarouselPreset};
use crate::components::carousel::{Carousel, Layout};

const VALUES: &[(&str, &str)] = &[
    ("Craft", "We sweat the details nobody asked about, because somebody always notices."),
    ("Candor", "Straight answers on scope, cost and risk, from the first call to the last invoice."),
    ("Ownership", "Whoever ships it, runs it. Our teams stay on until the thing works in production."),
    ("Curiosity", "Every project teaches us something. We write it down and share it."),
    ("Pace", "Small releases, often. Feedback beats speculation."),
];

const SERVICES: &[(&str, &str)] = &[
    ("Product Design", "Research, prototypes and design systems that survive contact with engineering."),
    ("Web Platforms", "Fast, accessible sites and web apps built to be edited by your own team."),
    ("Mobile Apps", "Native and cross-platform apps with offline support and sane release pipelines."),
    ("Data & Analytics", "Pipelines, dashboards and the boring plumbing that makes numbers trustworthy."),
    ("Cloud Operations", "Infrastructure as code, observability and on-call that does not burn people out."),
    ("Consulting", "Architecture reviews and hands-on rescue for projects that lost their way."),
];

const INDUSTRIES: &[(&str, &str)] = &[
    ("Healthcare", "/assets/industries/healthcare.webp"),
    ("Logistics", "/assets/industries/logistics.webp"),
    ("Fintech", "/assets/industries/fintech.webp"),
    ("Education", "/assets/industries/education.webp"),
    ("Retail", "/assets/industries/retail.webp"),
    ("Energy", "/assets/industries/energy.webp"),
];

const TECHNOLOGY: &[&str] = &[
    "Rust", "TypeScript", "Kotlin", "Swift", "PostgreSQL", "Kubernetes", "Terraform", "WebAssembly",
];

const TESTIMONIALS: &[(&str, &str, &str)] = &[
    (
        "They rebuilt our booking flow in six weeks and conversion went up by a third. More importantly, our own developers understand the code.",
        "Maria Lindqvist",
        "Head of Product, Fjord Travel",
    ),
    (
        "The first agency that told us what not to build. Saved us a quarter of work.",
        "Daniel Okafor",
        "CTO, Parcelhop",
    ),
    (
        "On-call used to be dreaded here. After their ops engagement, it is mostly quiet.",
        "Aiko Tanaka",
        "VP Engineering, Gridwise",
    ),
    (
        "Clear weekly demos, no surprises on the invoice. We signed the second project before the first one ended.",
        "Sam Reyes",
        "Founder, Lumen Learning",
    ),
];

const PORTFOLIO: &[(&str, &str, &str)] = &[
    ("Fjord Travel", "Booking platform redesign", "/assets/portfolio/fjord.webp"),
    ("Parcelhop", "Courier dispatch app", "/assets/portfolio/parcelhop.webp"),
    ("Gridwise", "Energy trading dashboard", "/assets/portfolio/gridwise.webp"),
    ("Lumen Learning", "Adaptive course player", "/assets/portfolio/lumen.webp"),
    ("Northbank", "Mortgage onboarding", "/assets/portfolio/northbank.webp"),
];

// Testimonials run slower than the default preset on this page.
const TESTIMONIAL_OVERRIDES: &str = r#"{"interval_ms": 4500, "item_extent": 640, "visible_extent": 640}"#;

fn testimonial_config() -> CarouselConfig {
    match CarouselConfig::from_json(TESTIMONIAL_OVERRIDES) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Ignoring testimonial carousel overrides: {}", err);
            CarouselPreset::Testimonials.config()
        }
    }
}

#[derive(Properties, PartialEq)]
struct SectionProps {
    title: String,
    #[prop_or_default]
    subtitle: Option<String>,
    children: Children,
}

#[function_component(Section)]
fn section(props: &SectionProps) -> Html {
    html! {
        <section class="home-section">
            <h2>{&props.title}</h2>
            {
                if let Some(subtitle) = &props.subtitle {
                    html! { <p class="section-subtitle">{subtitle}</p> }
                } else {
                    html! {}
                }
            }
            { for props.children.iter() }
        </section>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    // Scroll to top only on initial mount
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    let values: Vec<Html> = VALUES
        .iter()
        .map(|(title, body)| html! {
            <div class="value-card">
                <h3>{*title}</h3>
                <p>{*body}</p>
            </div>
        })
        .collect();

    let services: Vec<Html> = SERVICES
        .iter()
        .map(|(title, body)| html! {
            <div class="service-card">
                <h3>{*title}</h3>
                <p>{*body}</p>
            </div>
        })
        .collect();

    let industries: Vec<Html> = INDUSTRIES
        .iter()
        .map(|(name, image)| html! {
            <div class="industry-card">
                <img src={*image} alt={*name} loading="lazy" draggable="false" />
                <span>{*name}</span>
            </div>
        })
        .collect();

    let technology: Vec<Html> = TECHNOLOGY
        .iter()
        .map(|name| html! { <div class="tech-chip">{*name}</div> })
        .collect();

    let testimonials: Vec<Html> = TESTIMONIALS
        .iter()
        .map(|(quote, name, role)| html! {
            <blockquote class="testimonial-card">
                <p>{format!("“{}”", quote)}</p>
                <footer>
                    <strong>{*name}</strong>
                    <span>{*role}</span>
                </footer>
            </blockquote>
        })
        .collect();

    let portfolio: Vec<Html> = PORTFOLIO
        .iter()
        .map(|(client, project, image)| html! {
            <div class="portfolio-card">
                <img src={*image} alt={*project} loading="lazy" draggable="false" />
                <div class="portfolio-caption">
                    <h3>{*client}</h3>
                    <p>{*project}</p>
                </div>
            </div>
        })
        .collect();

    html! {
        <div class="home-page">
            <section class="home-hero">
                <h1>{"Software that earns its keep"}</h1>
                <p>{"We design, build and run digital products for teams that would rather ship than talk about shipping."}</p>
                <a href="#services" class="hero-cta">{"See what we do"}</a>
            </section>

            <Section title="What we value">
                <Carousel config={CarouselPreset::Values.config()} items={values} show_arrows={false} />
            </Section>

            <div id="services">
                <Section title="Services" subtitle={Some("From first sketch to pager duty".to_string())}>
                    <Carousel config={CarouselPreset::Services.config()} items={services} />
                </Section>
            </div>

            <Section title="Industries we know">
                <Carousel config={CarouselPreset::Industries.config()} items={industries} show_dots={false} />
            </Section>

            <Section title="Tools of the trade">
                <Carousel
                    config={CarouselPreset::Technology.config()}
                    items={technology}
                    show_arrows={false}
                    show_dots={false}
                    class="tech-carousel"
                />
            </Section>

            <Section title="Selected work">
                <Carousel config={CarouselPreset::Portfolio.config()} items={portfolio} layout={Layout::Stack} />
            </Section>

            <Section title="What clients say">
                <Carousel config={testimonial_config()} items={testimonials} show_arrows={false} />
            </Section>

            <style>
                {r#"
                .home-page {
                    color: #ffffff;
                    background: #1a1a1a;
                    min-height: 100vh;
                    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                }
                .home-hero {
                    text-align: center;
                    padding: 8rem 2rem 6rem;
                }
                .home-hero h1 {
                    font-size: 3.5rem;
                    margin-bottom: 1rem;
                    background: linear-gradient(45deg, #fff, #7EB2FF);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                }
                .home-hero p {
                    color: #ccc;
                    max-width: 640px;
                    margin: 0 auto 2rem;
                    font-size: 1.2rem;
                }
                .hero-cta {
                    display: inline-block;
                    padding: 0.9rem 2rem;
                    border-radius: 8px;
                    background: #1E90FF;
                    color: #fff;
                    text-decoration: none;
                }
                .home-section {
                    padding: 4rem 1rem;
                    max-width: 1100px;
                    margin: 0 auto;
                }
                .home-section h2 {
                    text-align: center;
                    font-size: 2.2rem;
                    margin-bottom: 0.5rem;
                }
                .section-subtitle {
                    text-align: center;
                    color: #999;
                    margin-bottom: 2rem;
                }
                .value-card,
                .service-card,
                .testimonial-card {
                    height: 100%;
                    background: rgba(30, 30, 30, 0.8);
                    border: 1px solid rgba(30, 144, 255, 0.15);
                    border-radius: 12px;
                    padding: 2rem;
                    box-sizing: border-box;
                }
                .value-card h3,
                .service-card h3 {
                    color: #7EB2FF;
                    margin-top: 0;
                }
                .industry-card {
                    position: relative;
                    border-radius: 12px;
                    overflow: hidden;
                }
                .industry-card img,
                .portfolio-card img {
                    width: 100%;
                    display: block;
                    pointer-events: none;
                }
                .industry-card span {
                    position: absolute;
                    bottom: 1rem;
                    left: 1rem;
                    font-weight: 600;
                }
                .tech-chip {
                    text-align: center;
                    padding: 1rem;
                    border-radius: 999px;
                    border: 1px solid rgba(255, 255, 255, 0.2);
                }
                .testimonial-card {
                    margin: 0;
                    font-size: 1.2rem;
                }
                .testimonial-card footer {
                    display: flex;
                    flex-direction: column;
                    margin-top: 1rem;
                    color: #999;
                    font-size: 0.95rem;
                }
                .portfolio-card {
                    border-radius: 16px;
                    overflow: hidden;
                    background: #222;
                    box-shadow: 0 16px 32px rgba(0, 0, 0, 0.4);
                }
                .portfolio-caption {
                    padding: 1rem 1.5rem;
                }
                @media (max-width: 768px) {
                    .home-hero h1 {
                        font-size: 2.4rem;
                    }
                }
                "#}
            </style>
        </div>
    }
}
