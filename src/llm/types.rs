use serde::{Deserialize, Serialize};

/// A web page the research step drew on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchSource {
    pub title: String,
    pub uri: String,
}

/// Output of the research step: a niche performance summary plus any
/// citations from live retrieval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub summary: String,
    #[serde(default)]
    pub sources: Vec<ResearchSource>,
}

impl Blueprint {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            sources: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<ResearchSource>) -> Self {
        self.sources = sources;
        self
    }

    /// Summary text with a markdown citation section appended when sources
    /// exist.
    pub fn render(&self) -> String {
        if self.sources.is_empty() {
            return self.summary.clone();
        }
        let mut out = self.summary.clone();
        out.push_str("\n\n### Research Sources:\n");
        for source in &self.sources {
            out.push_str(&format!("\n- [{}]({})", source.title, source.uri));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_sources_is_summary() {
        assert_eq!(Blueprint::new("Hooks: questions").render(), "Hooks: questions");
    }

    #[test]
    fn render_appends_citations() {
        let blueprint = Blueprint::new("Hooks: questions").with_sources(vec![
            ResearchSource {
                title: "Creator report".into(),
                uri: "https://example.com/report".into(),
            },
            ResearchSource {
                title: "Source".into(),
                uri: "https://example.com/b".into(),
            },
        ]);
        assert_eq!(
            blueprint.render(),
            "Hooks: questions\n\n### Research Sources:\n\n- [Creator report](https://example.com/report)\n- [Source](https://example.com/b)"
        );
    }
}
