//! Script rendering
//!
//! Turns a set of points into the textual protocol read by the external
//! simulator:
//!
//! ```text
//! <intro block>
//! (simulate <samples> :params '<point> :start <run id> :filename "<name>")
//! ...
//! <outro block>
//! ```
//!
//! Rendering is a pure function of its inputs. Writing scripts to disk
//! belongs to the caller.

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::point::HyperPoint;

/// Substitution marker inside a directive template.
pub const SLOT: &str = "{}";

/// Number of slots a directive template must provide.
pub const DIRECTIVE_SLOTS: usize = 4;

/// Default directive: sample count, point, first run id, file name.
pub const DEFAULT_DIRECTIVE: &str =
    "(simulate {} :params '{} :start {} :filename \"{}\")";

/// Default intro: load the simulator and the model under study.
pub const DEFAULT_INTRO: &str = "(load \"load-act-r.lisp\")\n(load \"model.lisp\")\n";

/// Default outro.
pub const DEFAULT_OUTRO: &str = "(quit)\n";

/// A parsed directive template with exactly [`DIRECTIVE_SLOTS`] slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveTemplate {
    source: String,
    pieces: Vec<String>,
}

impl DirectiveTemplate {
    /// Parse a template, checking the slot count.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let pieces: Vec<String> = source.split(SLOT).map(String::from).collect();
        let found = pieces.len() - 1;
        if found != DIRECTIVE_SLOTS {
            return Err(TemplateError::SlotCount {
                expected: DIRECTIVE_SLOTS,
                found,
            });
        }
        Ok(Self {
            source: source.to_string(),
            pieces,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Substitute `values` into the slots, in order.
    pub fn fill(&self, values: [String; DIRECTIVE_SLOTS]) -> String {
        let mut out = String::with_capacity(
            self.source.len() + values.iter().map(String::len).sum::<usize>(),
        );
        for (piece, value) in self.pieces.iter().zip(values.iter()) {
            out.push_str(piece);
            out.push_str(value);
        }
        if let Some(tail) = self.pieces.last() {
            out.push_str(tail);
        }
        out
    }
}

impl Default for DirectiveTemplate {
    fn default() -> Self {
        let pieces = DEFAULT_DIRECTIVE.split(SLOT).map(String::from).collect();
        Self {
            source: DEFAULT_DIRECTIVE.to_string(),
            pieces,
        }
    }
}

/// The fixed text surrounding the per-point directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptTemplate {
    pub intro: String,
    #[serde(with = "directive_serde")]
    pub directive: DirectiveTemplate,
    pub outro: String,
}

impl ScriptTemplate {
    pub fn new(intro: impl Into<String>, outro: impl Into<String>) -> Self {
        Self {
            intro: intro.into(),
            directive: DirectiveTemplate::default(),
            outro: outro.into(),
        }
    }

    /// Builder method: replace the directive template.
    pub fn with_directive(mut self, directive: DirectiveTemplate) -> Self {
        self.directive = directive;
        self
    }
}

impl Default for ScriptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_INTRO, DEFAULT_OUTRO)
    }
}

mod directive_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DirectiveTemplate;

    pub fn serialize<S: Serializer>(
        template: &DirectiveTemplate,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(template.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DirectiveTemplate, D::Error> {
        let source = String::deserialize(deserializer)?;
        DirectiveTemplate::parse(&source).map_err(serde::de::Error::custom)
    }
}

/// Anything that can be rendered as one script.
pub trait PointSource {
    /// Label identifying the script, used for its file name.
    fn label(&self) -> &str;

    /// Points in enumeration order.
    fn points(&self) -> Vec<HyperPoint>;
}

/// Render `source` with the given intro and outro and the default directive.
pub fn render(source: &impl PointSource, intro: &str, outro: &str) -> String {
    render_with(source, &ScriptTemplate::new(intro, outro))
}

/// Render `source` with a full script template.
///
/// Each directive is terminated by a newline.
pub fn render_with(source: &impl PointSource, template: &ScriptTemplate) -> String {
    render_points(&source.points(), template)
}

/// Render an explicit list of points.
pub fn render_points(points: &[HyperPoint], template: &ScriptTemplate) -> String {
    let mut script = template.intro.clone();
    for point in points {
        script.push_str(&point.to_directive(&template.directive));
        script.push('\n');
    }
    script.push_str(&template.outro);
    script
}
