//! Task kind variants and effort estimation.
//!
//! Each kind carries its own estimation inputs; [`TaskKind::estimate`] is a
//! pure function of those fields plus the task's priority, so recomputing
//! after a field change always reflects the current state.

use serde::{Deserialize, Serialize};

use super::task::TaskPriority;
use crate::errors::TaskboardError;

/// Bug severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BugSeverity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for BugSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for BugSeverity {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" | "crit" => Ok(Self::Critical),
            _ => Err(TaskboardError::InvalidSeverity {
                severity: s.to_string(),
            }),
        }
    }
}

/// Bug-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugDetails {
    pub severity: BugSeverity,

    #[serde(rename = "stepsToReproduce")]
    pub steps_to_reproduce: String,
}

impl Default for BugDetails {
    fn default() -> Self {
        Self {
            severity: BugSeverity::Medium,
            steps_to_reproduce: String::new(),
        }
    }
}

/// Feature-specific fields. Both scores live on a 1-5 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDetails {
    pub complexity: u8,

    #[serde(rename = "businessValue")]
    pub business_value: u8,
}

impl Default for FeatureDetails {
    fn default() -> Self {
        Self {
            complexity: 3,
            business_value: 3,
        }
    }
}

/// Documentation-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentationDetails {
    /// Approximate page count. Always at least 1; fractional input is
    /// rounded up on set.
    pub pages: u32,

    /// Technical documentation takes longer than user-facing docs.
    pub technical: bool,
}

impl Default for DocumentationDetails {
    fn default() -> Self {
        Self {
            pages: 1,
            technical: true,
        }
    }
}

/// Closed set of task variants.
///
/// The discriminator replaces the class hierarchy the domain is usually
/// modeled with: estimation is an exhaustive match, so a new variant cannot
/// be added without deciding its estimation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TaskKind {
    #[default]
    Generic,
    Bug(BugDetails),
    Feature(FeatureDetails),
    Documentation(DocumentationDetails),
}

impl TaskKind {
    /// Build a kind from a free-form discriminator string, falling back to
    /// `Generic` for anything unrecognized. Each variant starts with its
    /// defaults.
    pub fn from_discriminator(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "BUG" => Self::Bug(BugDetails::default()),
            "FEATURE" => Self::Feature(FeatureDetails::default()),
            "DOCUMENTATION" | "DOC" | "DOCS" => {
                Self::Documentation(DocumentationDetails::default())
            }
            _ => Self::Generic,
        }
    }

    /// Stable name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Bug(_) => "bug",
            Self::Feature(_) => "feature",
            Self::Documentation(_) => "documentation",
        }
    }

    /// Compute the effort estimate in hours for this kind under the given
    /// priority.
    ///
    /// Rules:
    /// - generic: flat 1 hour
    /// - bug: severity base (low 1, medium 2, high 4, critical 8)
    /// - feature: 2 + complexity x 2, +2 when business value >= 4
    /// - documentation: 1 hour per page, x1.5 when technical
    ///
    /// All kinds except generic add +1 for high priority and +2 for
    /// critical priority.
    pub fn estimate(&self, priority: TaskPriority) -> f64 {
        let base = match self {
            Self::Generic => return 1.0,
            Self::Bug(bug) => match bug.severity {
                BugSeverity::Low => 1.0,
                BugSeverity::Medium => 2.0,
                BugSeverity::High => 4.0,
                BugSeverity::Critical => 8.0,
            },
            Self::Feature(feature) => {
                let mut hours = 2.0 + f64::from(feature.complexity) * 2.0;
                if feature.business_value >= 4 {
                    hours += 2.0;
                }
                hours
            }
            Self::Documentation(doc) => {
                let hours = f64::from(doc.pages);
                if doc.technical {
                    hours * 1.5
                } else {
                    hours
                }
            }
        };

        base + match priority {
            TaskPriority::Critical => 2.0,
            TaskPriority::High => 1.0,
            TaskPriority::Medium | TaskPriority::Low => 0.0,
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_discriminator() {
        assert_eq!(TaskKind::from_discriminator("bug").name(), "bug");
        assert_eq!(TaskKind::from_discriminator("FEATURE").name(), "feature");
        assert_eq!(
            TaskKind::from_discriminator(" documentation ").name(),
            "documentation"
        );
        assert_eq!(TaskKind::from_discriminator("chore").name(), "generic");
        assert_eq!(TaskKind::from_discriminator("").name(), "generic");
    }

    #[test]
    fn test_generic_estimate_is_constant() {
        assert!((TaskKind::Generic.estimate(TaskPriority::Critical) - 1.0).abs() < f64::EPSILON);
        assert!((TaskKind::Generic.estimate(TaskPriority::Low) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bug_estimate_severity_table() {
        for (severity, expected) in [
            (BugSeverity::Low, 1.0),
            (BugSeverity::Medium, 2.0),
            (BugSeverity::High, 4.0),
            (BugSeverity::Critical, 8.0),
        ] {
            let kind = TaskKind::Bug(BugDetails {
                severity,
                steps_to_reproduce: String::new(),
            });
            assert!((kind.estimate(TaskPriority::Medium) - expected).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_bug_estimate_priority_adjustment() {
        let kind = TaskKind::Bug(BugDetails {
            severity: BugSeverity::Critical,
            steps_to_reproduce: String::new(),
        });
        assert!((kind.estimate(TaskPriority::Critical) - 10.0).abs() < f64::EPSILON);
        assert!((kind.estimate(TaskPriority::High) - 9.0).abs() < f64::EPSILON);
        assert!((kind.estimate(TaskPriority::Low) - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_feature_estimate() {
        let kind = TaskKind::Feature(FeatureDetails {
            complexity: 3,
            business_value: 5,
        });
        // 2 + 3*2 + 2 (high value) + 1 (high priority)
        assert!((kind.estimate(TaskPriority::High) - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_feature_estimate_low_value_no_bonus() {
        let kind = TaskKind::Feature(FeatureDetails {
            complexity: 1,
            business_value: 3,
        });
        assert!((kind.estimate(TaskPriority::Medium) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_documentation_estimate() {
        let kind = TaskKind::Documentation(DocumentationDetails {
            pages: 5,
            technical: true,
        });
        assert!((kind.estimate(TaskPriority::Low) - 7.5).abs() < f64::EPSILON);

        let plain = TaskKind::Documentation(DocumentationDetails {
            pages: 5,
            technical: false,
        });
        assert!((plain.estimate(TaskPriority::Critical) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_severity_parsing() {
        assert_eq!("critical".parse::<BugSeverity>().unwrap(), BugSeverity::Critical);
        assert_eq!("MED".parse::<BugSeverity>().unwrap(), BugSeverity::Medium);
        assert!("catastrophic".parse::<BugSeverity>().is_err());
    }
}
