use crate::motion::search_demo::Scenario;
use thiserror::Error;

pub const SITE_OWNER: &str = "Noa Halvorsen";
pub const SITE_ROLE: &str = "Product designer";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("no case study with slug {0:?}")]
    UnknownSlug(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Video,
}

/// Media reference. Existence is not checked at runtime; `aspect` is what
/// the component reserves so layout does not shift while it loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Asset {
    pub kind: AssetKind,
    pub src: &'static str,
    pub alt: &'static str,
    pub aspect: (u32, u32),
}

impl Asset {
    const fn image(src: &'static str, alt: &'static str, aspect: (u32, u32)) -> Self {
        Self {
            kind: AssetKind::Image,
            src,
            alt,
            aspect,
        }
    }

    const fn video(src: &'static str, alt: &'static str, aspect: (u32, u32)) -> Self {
        Self {
            kind: AssetKind::Video,
            src,
            alt,
            aspect,
        }
    }

    pub fn aspect_ratio_css(&self) -> String {
        format!("aspect-ratio: {} / {};", self.aspect.0, self.aspect.1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metric {
    pub value: f64,
    pub decimals: usize,
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub label: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaseSection {
    pub id: &'static str,
    pub heading: &'static str,
    pub paragraphs: &'static [&'static str],
    pub media: Option<Asset>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaseStudy {
    pub slug: &'static str,
    pub title: &'static str,
    pub client: &'static str,
    pub year: u16,
    pub role: &'static str,
    pub summary: &'static str,
    pub cover: Asset,
    pub protected: bool,
    pub metrics: &'static [Metric],
    pub sections: &'static [CaseSection],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insight {
    pub title: &'static str,
    pub front: &'static str,
    pub back: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DockItem {
    pub label: &'static str,
    pub href: &'static str,
    pub glyph: &'static str,
}

const CASE_STUDIES: &[CaseStudy] = &[
    CaseStudy {
        slug: "atlas",
        title: "Atlas",
        client: "Northwind Freight",
        year: 2024,
        role: "Lead designer",
        summary: "Rebuilding dispatch for a fleet of 1,200 trucks around one live map.",
        cover: Asset::image("/media/atlas/cover.webp", "Atlas dispatch map with live routes", (16, 10)),
        protected: false,
        metrics: &[
            Metric {
                value: 38.0,
                decimals: 0,
                prefix: "",
                suffix: "%",
                label: "faster load assignment",
            },
            Metric {
                value: 1_200.0,
                decimals: 0,
                prefix: "",
                suffix: "",
                label: "trucks on one map",
            },
        ],
        sections: &[
            CaseSection {
                id: "problem",
                heading: "Problem",
                paragraphs: &[
                    "Dispatchers juggled four tools and a whiteboard to decide which truck took which load.",
                    "Every handoff between tools was a chance to double-book a driver.",
                ],
                media: None,
            },
            CaseSection {
                id: "process",
                heading: "Process",
                paragraphs: &[
                    "Two weeks of ride-alongs in the dispatch office produced a single question: where is everyone right now?",
                ],
                media: Some(Asset::video("/media/atlas/process.mp4", "Dispatcher dragging a load onto a truck", (16, 9))),
            },
            CaseSection {
                id: "outcome",
                heading: "Outcome",
                paragraphs: &["The map became the product. Tables moved into a drawer that most dispatchers never open."],
                media: Some(Asset::image("/media/atlas/outcome.webp", "Final Atlas interface", (16, 10))),
            },
        ],
    },
    CaseStudy {
        slug: "harbor",
        title: "Harbor",
        client: "Harbor Health",
        year: 2023,
        role: "Product designer",
        summary: "A calmer patient portal for booking, messaging and lab results.",
        cover: Asset::image("/media/harbor/cover.webp", "Harbor patient portal home screen", (4, 3)),
        protected: true,
        metrics: &[Metric {
            value: 4.8,
            decimals: 1,
            prefix: "",
            suffix: "★",
            label: "app store rating",
        }],
        sections: &[
            CaseSection {
                id: "context",
                heading: "Context",
                paragraphs: &["Patients opened the old portal for one thing and left before finding it."],
                media: None,
            },
            CaseSection {
                id: "design",
                heading: "Design",
                paragraphs: &[
                    "Each task got its own entry point from the home screen.",
                    "Lab results arrive with a plain-language summary written with clinicians.",
                ],
                media: Some(Asset::image("/media/harbor/results.webp", "Lab results with summary", (9, 16))),
            },
        ],
    },
    CaseStudy {
        slug: "lumen",
        title: "Lumen Search",
        client: "Lumen",
        year: 2025,
        role: "Design lead, AI search",
        summary: "Designing how an answer engine thinks out loud without making people wait.",
        cover: Asset::video("/media/lumen/cover.mp4", "Lumen answer streaming in", (16, 9)),
        protected: true,
        metrics: &[Metric {
            value: 2.3,
            decimals: 1,
            prefix: "",
            suffix: "×",
            label: "follow-up questions per session",
        }],
        sections: &[CaseSection {
            id: "streaming",
            heading: "Streaming answers",
            paragraphs: &["Skeleton results hold the layout while the answer types itself out."],
            media: Some(Asset::video("/media/lumen/streaming.mp4", "Skeleton tiles resolving", (16, 9))),
        }],
    },
];

pub const INSIGHTS: [Insight; 4] = [
    Insight {
        title: "Design the empty state first",
        front: "The first screen most people see has nothing in it.",
        back: "Start there and the rest of the flow tends to fall into place.",
    },
    Insight {
        title: "Motion is a status bar",
        front: "Animation earns its place when it tells you what the system is doing.",
        back: "If a transition carries no information, cut it or shorten it.",
    },
    Insight {
        title: "Ship the prototype",
        front: "A clickable thing on a phone beats a perfect file.",
        back: "Most decisions get made in the hallway test, not the review.",
    },
    Insight {
        title: "Write the words",
        front: "Lorem ipsum hides the hardest design problem on the page.",
        back: "Real copy exposes layout and flow issues weeks earlier.",
    },
];

pub const DOCK_ITEMS: [DockItem; 5] = [
    DockItem {
        label: "Work",
        href: "/#work",
        glyph: "◼",
    },
    DockItem {
        label: "Insights",
        href: "/#insights",
        glyph: "◆",
    },
    DockItem {
        label: "Playground",
        href: "/#playground",
        glyph: "●",
    },
    DockItem {
        label: "Resume",
        href: "/resume.pdf",
        glyph: "▲",
    },
    DockItem {
        label: "Email",
        href: "mailto:hello@example.com",
        glyph: "✉",
    },
];

pub const MARQUEE_WORDS: [&str; 8] = [
    "Product strategy",
    "Interaction design",
    "Design systems",
    "Prototyping",
    "Research",
    "Motion",
    "AI interfaces",
    "Accessibility",
];

pub static SEARCH_SCENARIOS: [Scenario; 6] = [
    Scenario {
        query: "quiet cafés to work from near me",
        response: "Found 4 cafés within a 10 minute walk with reliable wifi and outlets at most tables.",
        result_count: 4,
    },
    Scenario {
        query: "summarize my lab results",
        response: "Everything is in the normal range. Vitamin D is slightly low; your doctor left a note.",
        result_count: 2,
    },
    Scenario {
        query: "cheapest flight to lisbon in may",
        response: "The lowest fare is on May 14 with one stop. Flying a day later saves another 12%.",
        result_count: 6,
    },
    Scenario {
        query: "which trucks are free after 3pm",
        response: "Seven trucks are free after 3pm. Three are already near the Portland depot.",
        result_count: 3,
    },
    Scenario {
        query: "gift ideas for a climber",
        response: "Chalk bags, a guidebook for their home crag, or a gym day pass tend to land well.",
        result_count: 5,
    },
    Scenario {
        query: "how do I reset my password",
        response: "Open Settings, choose Security, then Reset password. A link goes to your email.",
        result_count: 1,
    },
];

pub fn case_studies() -> &'static [CaseStudy] {
    CASE_STUDIES
}

pub fn resolve(slug: &str) -> Result<&'static CaseStudy, ContentError> {
    CASE_STUDIES
        .iter()
        .find(|study| study.slug.eq_ignore_ascii_case(slug.trim()))
        .ok_or_else(|| ContentError::UnknownSlug(slug.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_slugs_resolve_and_unknown_ones_do_not() {
        assert_eq!(resolve("atlas").map(|study| study.title), Ok("Atlas"));
        assert_eq!(resolve("Harbor").map(|study| study.slug), Ok("harbor"));
        assert_eq!(
            resolve("missing").map(|study| study.slug),
            Err(ContentError::UnknownSlug("missing".to_string()))
        );
    }

    #[test]
    fn slugs_and_section_ids_are_unique() {
        let slugs: HashSet<_> = case_studies().iter().map(|study| study.slug).collect();
        assert_eq!(slugs.len(), case_studies().len());

        for study in case_studies() {
            let ids: HashSet<_> = study.sections.iter().map(|section| section.id).collect();
            assert_eq!(ids.len(), study.sections.len(), "{}", study.slug);
        }
    }

    #[test]
    fn demo_scripts_are_well_formed() {
        assert_eq!(SEARCH_SCENARIOS.len(), 6);
        for scenario in SEARCH_SCENARIOS {
            assert!(!scenario.query.is_empty());
            assert!(!scenario.response.is_empty());
            assert!(scenario.result_count > 0);
        }
        assert_eq!(INSIGHTS.len(), 4);
    }

    #[test]
    fn aspect_ratio_renders_as_css() {
        let cover = resolve("atlas").expect("exists").cover;
        assert_eq!(cover.aspect_ratio_css(), "aspect-ratio: 16 / 10;");
    }
}
