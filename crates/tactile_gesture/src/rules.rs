//! Ordered gesture rule table
//!
//! Classification runs every rule against every contact, in table order:
//!
//! ```text
//! up, down, left, right, upleft, upright, downleft, downright
//! two up, two down, ... two downright
//! three up, three down, ... three downright
//! pinch
//! ```
//!
//! A matching rule writes its name into the contact's direction label, so
//! the last matching rule wins. Multi-finger and pinch rules read labels
//! written earlier in the same pass, which makes the table order part of
//! the semantics: base directions must run before the rules that read them.

use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

use crate::contact::Contact;

/// Distance a contact must stay within (or travel beyond) on an axis
pub const THRESHOLD: f32 = 50.0;

// =========================================================================
// Rule Kinds
// =========================================================================

/// The eight base swipe directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// All directions in rule table order
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpLeft => "upleft",
            Direction::UpRight => "upright",
            Direction::DownLeft => "downleft",
            Direction::DownRight => "downright",
        }
    }

    /// Test a delta against this direction
    ///
    /// Straight directions tolerate up to [`THRESHOLD`] of drift on the
    /// cross axis; diagonals need more than [`THRESHOLD`] on both axes.
    pub fn matches(&self, dx: f32, dy: f32) -> bool {
        match self {
            Direction::Up => dx.abs() < THRESHOLD && dy < 0.0,
            Direction::Down => dx.abs() < THRESHOLD && dy > 0.0,
            Direction::Left => dx < 0.0 && dy.abs() < THRESHOLD,
            Direction::Right => dx > 0.0 && dy.abs() < THRESHOLD,
            Direction::UpLeft => dx < -THRESHOLD && dy < -THRESHOLD,
            Direction::UpRight => dx > THRESHOLD && dy < -THRESHOLD,
            Direction::DownLeft => dx < -THRESHOLD && dy > THRESHOLD,
            Direction::DownRight => dx > THRESHOLD && dy > THRESHOLD,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finger counts that have composite rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fingers {
    Two,
    Three,
}

impl Fingers {
    pub const ALL: [Fingers; 2] = [Fingers::Two, Fingers::Three];

    pub fn count(&self) -> usize {
        match self {
            Fingers::Two => 2,
            Fingers::Three => 3,
        }
    }

    pub fn word(&self) -> &'static str {
        match self {
            Fingers::Two => "two",
            Fingers::Three => "three",
        }
    }
}

/// What a rule tests
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    /// A single contact's deltas point in one direction
    Direction { direction: Direction },
    /// A fixed number of contacts carry the same base label
    MultiFinger {
        fingers: Fingers,
        direction: Direction,
    },
    /// Two contacts whose labels oppose each other on one axis
    Pinch,
}

// =========================================================================
// Rules
// =========================================================================

/// A named entry in the rule table
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GestureRule {
    name: String,
    #[serde(flatten)]
    kind: RuleKind,
}

impl GestureRule {
    fn new(name: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Event name published when the rule matches
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Evaluate the rule for `contact`, one member of `all`
    pub fn matches(&self, contact: &Contact, all: &[Contact]) -> bool {
        match self.kind {
            RuleKind::Direction { direction } => {
                direction.matches(contact.delta_x(), contact.delta_y())
            }
            // Only the evaluated contact's own label is checked. Siblings
            // carrying the label do not help a contact that lacks it.
            RuleKind::MultiFinger { fingers, direction } => {
                all.len() == fingers.count()
                    && all
                        .iter()
                        .all(|_| contact.direction().trim() == direction.name())
            }
            RuleKind::Pinch => match all {
                [a, b] => opposing(a.direction(), b.direction()),
                _ => false,
            },
        }
    }
}

fn opposing(a: &str, b: &str) -> bool {
    (a.contains("left") && b.contains("right"))
        || (a.contains("right") && b.contains("left"))
        || (a.contains("up") && b.contains("down"))
        || (a.contains("down") && b.contains("up"))
}

/// The immutable, ordered rule table
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GestureRuleSet {
    rules: Vec<GestureRule>,
}

impl GestureRuleSet {
    /// The standard table, built once on first use
    pub fn standard() -> &'static GestureRuleSet {
        static RULES: OnceLock<GestureRuleSet> = OnceLock::new();
        RULES.get_or_init(Self::build)
    }

    fn build() -> Self {
        let mut rules = Vec::with_capacity(Direction::ALL.len() * 3 + 1);

        for direction in Direction::ALL {
            rules.push(GestureRule::new(
                direction.name(),
                RuleKind::Direction { direction },
            ));
        }

        for fingers in Fingers::ALL {
            for direction in Direction::ALL {
                rules.push(GestureRule::new(
                    format!("{} {}", fingers.word(), direction.name()),
                    RuleKind::MultiFinger { fingers, direction },
                ));
            }
        }

        rules.push(GestureRule::new("pinch", RuleKind::Pinch));

        Self { rules }
    }

    /// Rules in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &GestureRule> + '_ {
        self.rules.iter()
    }

    /// Rule names in evaluation order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(GestureRule::name)
    }

    /// Look up a rule by name
    pub fn get(&self, name: &str) -> Option<&GestureRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify every contact in place
    ///
    /// Contacts are processed in order, and for each one every rule runs in
    /// table order without short-circuiting. Each match relabels the contact
    /// before the next rule runs, then `on_match` is called with the rule and
    /// the relabelled contact.
    pub fn classify<F>(&self, contacts: &mut [Contact], mut on_match: F)
    where
        F: FnMut(&GestureRule, &Contact),
    {
        for index in 0..contacts.len() {
            for rule in &self.rules {
                let matched = {
                    let all: &[Contact] = contacts;
                    rule.matches(&all[index], all)
                };
                if matched {
                    contacts[index].set_direction(&rule.name);
                    on_match(rule, &contacts[index]);
                }
            }
        }
    }
}
