//! Content Overlay - renders story pages with live space weather annotations.
//!
//! Rendering works as follows:
//! 1. **Base**: Start from the page's static content
//! 2. **Match**: Select overlay rules whose adaptation is active and whose page range contains the index
//! 3. **Append**: Add each matching rule's text and extra choice, in rule order
//!
//! Rendering always starts from the base page, so re-rendering under new
//! adaptations never stacks annotations.

mod rules;

pub use rules::*;

use serde::{Deserialize, Serialize};
use space_weather::ActiveAdaptations;

use crate::library::{Hotspot, PageContent};

/// Symbols removed from text before it is spoken.
const SPEECH_STRIPPED: [char; 4] = ['🌟', '⚡', '🌍', '💡'];

/// A page as the reader sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPage {
    pub index: usize,
    pub title: String,
    pub text: String,
    pub choices: Vec<String>,
    pub hotspots: Vec<Hotspot>,
}

impl RenderedPage {
    /// Plain-text rendering: title, body and numbered choices.
    pub fn to_display_string(&self) -> String {
        let mut out = format!("{}\n\n{}", self.title, self.text);
        if !self.choices.is_empty() {
            out.push_str("\n\n");
            for (i, choice) in self.choices.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, choice));
            }
        }
        out
    }

    /// Body text with overlay symbols removed and line breaks flattened.
    pub fn speech_text(&self) -> String {
        self.text
            .chars()
            .filter(|c| !SPEECH_STRIPPED.contains(c))
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect()
    }

    /// Number of selectable choices, overlay choices included.
    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }
}

/// Applies overlay rules to base pages.
#[derive(Debug, Clone)]
pub struct ContentOverlay {
    config: OverlayConfig,
}

impl ContentOverlay {
    /// Create an overlay that applies `config.rules` in order.
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    /// Create an overlay with the three built-in live-event rules.
    pub fn with_defaults() -> Self {
        Self::new(OverlayConfig::default())
    }

    /// Render `page` at `index` under the given adaptation flags.
    pub fn render(
        &self,
        page: &PageContent,
        index: usize,
        adaptations: &ActiveAdaptations,
    ) -> RenderedPage {
        let mut rendered = RenderedPage {
            index,
            title: page.title.clone(),
            text: page.text.clone(),
            choices: page.choices.clone(),
            hotspots: page.hotspots.clone(),
        };

        for rule in self.matching_rules(index, adaptations) {
            rendered.text.push_str(&rule.text);
            if let Some(choice) = &rule.extra_choice {
                rendered.choices.push(choice.clone());
            }
        }

        rendered
    }

    fn matching_rules<'a>(
        &'a self,
        index: usize,
        adaptations: &'a ActiveAdaptations,
    ) -> impl Iterator<Item = &'a OverlayRule> {
        self.config
            .rules
            .iter()
            .filter(move |rule| adaptations.is_active(rule.adaptation) && rule.applies(index))
    }
}

impl Default for ContentOverlay {
    fn default() -> Self {
        Self::with_defaults()
    }
}
