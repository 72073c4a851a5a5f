//! Inline scanner
//!
//! An ordered list of matchers, each a regular expression paired with a node
//! constructor. At every position all matchers are tried against the remaining
//! text and the one whose match starts earliest wins; ties go to the matcher
//! listed first. Text before the winning match becomes a plain text node.
//!
//! The extended tokens come before the standard markdown ones. Marks do not
//! nest: the content of a `**bold**` span is taken literally.

use crate::common::{generate_local_id, parse_timestamp, split_status_attrs};
use crate::model::{
    DateStamp, Emoji, InlineCard, InlineNode, Mark, Mention, Status, SubSup, Text,
};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{user:([^}]+)\}").unwrap());
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{date:([^}]+)\}").unwrap());
static STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{status:([^|}]+)(?:\|([^}]+))?\}").unwrap());
static CARD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{card:([^}]+)\}").unwrap());
static EMOJI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r":([a-z0-9_+-]+):").unwrap());
static LEGACY_MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@\[([^\]]+)\]\(accountId:([^)]+)\)").unwrap());
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[([^\]]+)\]\(([^)\s]+)(?:\s+"([^"]+)")?\)"#).unwrap());
static STRONG_EM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*\*([^*]+)\*\*\*").unwrap());
static STRONG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").unwrap());
static EM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*|_([^_]+)_").unwrap());
static STRIKE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~([^~]+)~~").unwrap());
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{color:([^}]+)\}(.+?)\{color\}").unwrap());
static UNDERLINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<u>([^<]+)</u>").unwrap());
static SUB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<sub>([^<]+)</sub>").unwrap());
static SUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<sup>([^<]+)</sup>").unwrap());

struct Matcher {
    name: &'static str,
    pattern: &'static Lazy<Regex>,
    build: fn(&Captures<'_>) -> InlineNode,
}

static MATCHERS: &[Matcher] = &[
    Matcher {
        name: "mention",
        pattern: &MENTION_RE,
        build: mention,
    },
    Matcher {
        name: "date",
        pattern: &DATE_RE,
        build: date,
    },
    Matcher {
        name: "status",
        pattern: &STATUS_RE,
        build: status,
    },
    Matcher {
        name: "card",
        pattern: &CARD_RE,
        build: card,
    },
    Matcher {
        name: "emoji",
        pattern: &EMOJI_RE,
        build: emoji,
    },
    Matcher {
        name: "legacy-mention",
        pattern: &LEGACY_MENTION_RE,
        build: legacy_mention,
    },
    Matcher {
        name: "link",
        pattern: &LINK_RE,
        build: link,
    },
    Matcher {
        name: "strong-em",
        pattern: &STRONG_EM_RE,
        build: strong_em,
    },
    Matcher {
        name: "strong",
        pattern: &STRONG_RE,
        build: |caps| marked(either(caps), Mark::Strong),
    },
    Matcher {
        name: "em",
        pattern: &EM_RE,
        build: |caps| marked(either(caps), Mark::Em),
    },
    Matcher {
        name: "strike",
        pattern: &STRIKE_RE,
        build: |caps| marked(&caps[1], Mark::Strike),
    },
    Matcher {
        name: "code",
        pattern: &CODE_RE,
        build: |caps| marked(&caps[1], Mark::Code),
    },
    Matcher {
        name: "text-color",
        pattern: &COLOR_RE,
        build: text_color,
    },
    Matcher {
        name: "underline",
        pattern: &UNDERLINE_RE,
        build: |caps| marked(&caps[1], Mark::Underline),
    },
    Matcher {
        name: "sub",
        pattern: &SUB_RE,
        build: |caps| subsup(&caps[1], SubSup::Sub),
    },
    Matcher {
        name: "sup",
        pattern: &SUP_RE,
        build: |caps| subsup(&caps[1], SubSup::Sup),
    },
];

/// Parses inline markdown into inline nodes. Never fails; unmatched text stays text.
pub fn parse_inline(text: &str) -> Vec<InlineNode> {
    let mut nodes = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let earliest = MATCHERS
            .iter()
            .filter_map(|matcher| matcher.pattern.captures(rest).map(|caps| (matcher, caps)))
            .min_by_key(|(_, caps)| caps.get(0).map_or(usize::MAX, |m| m.start()));

        let Some((matcher, caps)) = earliest else {
            nodes.push(InlineNode::text(rest));
            break;
        };
        let Some(whole) = caps.get(0) else {
            nodes.push(InlineNode::text(rest));
            break;
        };

        if whole.start() > 0 {
            nodes.push(InlineNode::text(&rest[..whole.start()]));
        }
        tracing::trace!(matcher = matcher.name, at = whole.start(), "inline match");
        nodes.push((matcher.build)(&caps));
        rest = &rest[whole.end()..];
    }

    nodes
}

fn either<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default()
}

fn marked(text: &str, mark: Mark) -> InlineNode {
    InlineNode::Text(Text::marked(text, mark))
}

fn subsup(text: &str, kind: SubSup) -> InlineNode {
    marked(text, Mark::Subsup { kind })
}

fn mention(caps: &Captures<'_>) -> InlineNode {
    InlineNode::Mention(Mention {
        id: caps[1].to_string(),
        display_text: format!("@{}", &caps[1]),
    })
}

fn legacy_mention(caps: &Captures<'_>) -> InlineNode {
    InlineNode::Mention(Mention {
        id: caps[2].to_string(),
        display_text: format!("@{}", &caps[1]),
    })
}

fn date(caps: &Captures<'_>) -> InlineNode {
    InlineNode::Date(DateStamp {
        timestamp: parse_timestamp(&caps[1]),
    })
}

fn status(caps: &Captures<'_>) -> InlineNode {
    let color = caps
        .get(2)
        .map(|attrs| split_status_attrs(attrs.as_str()))
        .and_then(|mut attrs| attrs.remove("color"))
        .filter(|color| !color.is_empty());
    InlineNode::Status(Status {
        text: caps[1].to_string(),
        color,
        local_id: generate_local_id(),
    })
}

fn card(caps: &Captures<'_>) -> InlineNode {
    InlineNode::InlineCard(InlineCard {
        url: caps[1].to_string(),
    })
}

fn emoji(caps: &Captures<'_>) -> InlineNode {
    InlineNode::Emoji(Emoji {
        short_name: Some(format!(":{}:", &caps[1])),
        text: None,
    })
}

fn link(caps: &Captures<'_>) -> InlineNode {
    marked(
        &caps[1],
        Mark::Link {
            href: caps[2].to_string(),
            title: caps.get(3).map(|m| m.as_str().to_string()),
        },
    )
}

fn strong_em(caps: &Captures<'_>) -> InlineNode {
    InlineNode::Text(Text {
        text: caps[1].to_string(),
        marks: vec![Mark::Strong, Mark::Em],
    })
}

fn text_color(caps: &Captures<'_>) -> InlineNode {
    marked(
        &caps[2],
        Mark::TextColor {
            color: caps[1].to_string(),
        },
    )
}
