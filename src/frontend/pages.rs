use super::browser::SessionUnlockStore;
use super::carousel::{AutoplayShowcase, InsightsDeck, VelocityMarquee};
use super::dock::MagnifyDock;
use super::hooks::use_first_visible;
use super::media::ScrollScaleMedia;
use super::reveal::{AutoFlipCard, CountUpMetric, Reveal, ScrambleHeading};
use super::search_demo::SearchDemo;
use super::{emit_log, use_site_config, Route};
use crate::content::{self, CaseStudy, DOCK_ITEMS, INSIGHTS, MARQUEE_WORDS, SITE_OWNER, SITE_ROLE};
use crate::gate::{AccessGate, GateForm, UnlockStore};
use crate::logging::LogLevel;
use crate::motion::visibility::{RootMargin, VisibilityConfig};
use serde_json::json;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

const STAGGER_MS: f64 = 80.0;

#[function_component(Home)]
pub fn home() -> Html {
    let studies = content::case_studies().to_vec();

    html! {
        <>
            <section class="hero" aria-labelledby="hero-heading">
                <p class="eyebrow">{SITE_ROLE}</p>
                <h1 id="hero-heading" class="sr-only">{SITE_OWNER}</h1>
                <ScrambleHeading text={SITE_OWNER} />
                <MagnifyDock items={DOCK_ITEMS.to_vec()} />
            </section>

            <VelocityMarquee words={MARQUEE_WORDS.to_vec()} />

            <section id="work" class="section-block" aria-labelledby="work-heading">
                <h2 id="work-heading">{"Selected work"}</h2>
                <AutoplayShowcase studies={studies.clone()} />
                <ul class="project-grid">
                    { for studies.iter().enumerate().map(|(index, study)| html! {
                        <li>
                            <Reveal delay_ms={index as f64 * STAGGER_MS}>
                                <ProjectCard study={*study} />
                            </Reveal>
                        </li>
                    }) }
                </ul>
            </section>

            <section id="insights" class="section-block" aria-labelledby="insights-heading">
                <h2 id="insights-heading">{"Insights"}</h2>
                <div class="flip-grid">
                    { for INSIGHTS.iter().enumerate().map(|(index, insight)| html! {
                        <AutoFlipCard insight={*insight} delay_ms={index as f64 * STAGGER_MS * 2.0} />
                    }) }
                </div>
                <InsightsDeck insights={INSIGHTS.to_vec()} />
            </section>

            <section id="playground" class="section-block" aria-labelledby="playground-heading">
                <h2 id="playground-heading">{"Playground"}</h2>
                <SearchDemo />
            </section>
        </>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    study: CaseStudy,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let study = props.study;
    html! {
        <Link<Route> to={Route::CaseStudy { slug: study.slug.to_string() }} classes={classes!("project-card")}>
            <img src={study.cover.src} alt={study.cover.alt} style={study.cover.aspect_ratio_css()} loading="lazy" />
            <h3>
                {study.title}
                if study.protected {
                    <span class="lock-mark" aria-label="Password protected">{" 🔒"}</span>
                }
            </h3>
            <p class="muted">{format!("{} · {}", study.client, study.year)}</p>
        </Link<Route>>
    }
}

#[derive(Properties, PartialEq)]
pub struct CaseStudyPageProps {
    pub slug: String,
}

#[function_component(CaseStudyPage)]
pub fn case_study_page(props: &CaseStudyPageProps) -> Html {
    let config = use_site_config();
    let resolved = content::resolve(&props.slug);

    {
        let missing = resolved.is_err();
        let slug = props.slug.clone();
        use_effect_with(slug, move |slug| {
            if missing {
                emit_log(&config, LogLevel::Info, "route_not_found", json!({ "slug": slug }));
            }
            || ()
        });
    }

    match resolved {
        // Keyed so moving between studies starts with fresh gate and TOC state.
        Ok(study) => html! { <CaseStudyView key={study.slug} study={*study} /> },
        Err(_) => html! { <NotFound /> },
    }
}

#[derive(Properties, PartialEq)]
struct CaseStudyViewProps {
    study: CaseStudy,
}

#[function_component(CaseStudyView)]
fn case_study_view(props: &CaseStudyViewProps) -> Html {
    let study = props.study;
    let unlocked = use_state(|| !study.protected || SessionUnlockStore.is_unlocked(study.slug));

    let on_unlock = {
        let unlocked = unlocked.clone();
        Callback::from(move |_| unlocked.set(true))
    };

    html! {
        <article class="case-study">
            <header class="case-header">
                <p class="eyebrow">{format!("{} · {} · {}", study.client, study.year, study.role)}</p>
                <h1>{study.title}</h1>
                <p class="lede">{study.summary}</p>
            </header>
            if *unlocked {
                <CaseStudyBody {study} />
            } else {
                <PasswordGate slug={study.slug} {on_unlock} />
            }
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct CaseStudyBodyProps {
    study: CaseStudy,
}

#[function_component(CaseStudyBody)]
fn case_study_body(props: &CaseStudyBodyProps) -> Html {
    let study = props.study;
    let section_refs = use_memo(study.sections.len(), |len| {
        (0..*len).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });
    // A section counts as current once its top passes the upper 40% of
    // the viewport.
    let toc_config = VisibilityConfig {
        threshold: 0.0,
        root_margin: RootMargin::parse("0px 0px -60% 0px").unwrap_or_default(),
    };
    let current = use_first_visible((*section_refs).clone(), toc_config);

    html! {
        <>
            <ScrollScaleMedia asset={study.cover} />

            if !study.metrics.is_empty() {
                <div class="metrics">
                    { for study.metrics.iter().map(|metric| html! { <CountUpMetric metric={*metric} /> }) }
                </div>
            }

            <div class="case-layout">
                <nav class="case-toc" aria-label="Sections">
                    <ol>
                        { for study.sections.iter().enumerate().map(|(index, section)| {
                            let active = current == Some(index);
                            html! {
                                <li class={classes!(active.then_some("is-active"))}>
                                    <a
                                        href={format!("#{}", section.id)}
                                        aria-current={active.then_some("location")}
                                    >
                                        {section.heading}
                                    </a>
                                </li>
                            }
                        }) }
                    </ol>
                </nav>

                <div class="case-sections">
                    { for study.sections.iter().zip(section_refs.iter()).map(|(section, node)| html! {
                        <section ref={node.clone()} id={section.id} class="case-section">
                            <Reveal>
                                <h2>{section.heading}</h2>
                                { for section.paragraphs.iter().map(|paragraph| html! { <p>{*paragraph}</p> }) }
                            </Reveal>
                            if let Some(media) = section.media {
                                <ScrollScaleMedia asset={media} caption={AttrValue::from(media.alt)} />
                            }
                        </section>
                    }) }
                </div>
            </div>
        </>
    }
}

#[derive(Properties, PartialEq)]
struct PasswordGateProps {
    slug: &'static str,
    on_unlock: Callback<()>,
}

#[function_component(PasswordGate)]
fn password_gate(props: &PasswordGateProps) -> Html {
    let config = use_site_config();
    let gate = use_memo(config.gate_password.clone(), |secret| AccessGate::new(secret.clone()));
    let form = use_state(GateForm::default);

    let oninput = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let input = event.target_unchecked_into::<HtmlInputElement>();
            let mut next = (*form).clone();
            next.set_input(&input.value());
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let slug = props.slug;
        let on_unlock = props.on_unlock.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let mut next = (*form).clone();
            match next.submit(&gate, &mut SessionUnlockStore, slug) {
                Ok(()) => {
                    emit_log(&config, LogLevel::Info, "gate_unlocked", json!({ "slug": slug }));
                    on_unlock.emit(());
                }
                Err(error) => emit_log(
                    &config,
                    LogLevel::Info,
                    "gate_rejected",
                    json!({ "slug": slug, "reason": error.code() }),
                ),
            }
            form.set(next);
        })
    };

    let message = form.message();

    html! {
        <form class="password-gate" {onsubmit}>
            <label for="gate-password">{"This case study is password protected."}</label>
            <div class="gate-row">
                <input
                    id="gate-password"
                    type="password"
                    autocomplete="current-password"
                    value={form.input().to_string()}
                    aria-invalid={message.is_some().to_string()}
                    aria-describedby="gate-message"
                    {oninput}
                />
                <button type="submit">{"Unlock"}</button>
            </div>
            <p id="gate-message" class="gate-message" role="alert">
                {message.unwrap_or_default()}
            </p>
        </form>
    }
}

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <section class="not-found" aria-labelledby="not-found-heading">
            <h1 id="not-found-heading">{"Page not found"}</h1>
            <p>{"That page does not exist or has moved."}</p>
            <Link<Route> to={Route::Home}>{"Back to the homepage"}</Link<Route>>
        </section>
    }
}
