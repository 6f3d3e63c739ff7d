//! Dashboard markup — status cards and the standalone page shell.
//!
//! Both are [askama](https://docs.rs/askama) templates under `templates/`;
//! everything that arrives over the wire (group ids, sensor names, text
//! readings) is HTML-escaped by the template engine.

use askama::Template;

use groupboard_domain::error::GroupBoardError;
use groupboard_domain::recency::RecencyPolicy;
use groupboard_domain::snapshot::{GroupSnapshot, format_value};
use groupboard_domain::time::{UnixSeconds, format_clock, from_unix_seconds};

use crate::page::PageSlots;

/// Groups container content when there is nothing to show.
pub const NO_DATA_PLACEHOLDER: &str =
    r#"<div class="no-data">No data received yet from any group</div>"#;

/// One `name: value` line of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorLine {
    pub name: String,
    pub value: String,
}

/// Display model of a single status card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCard {
    /// Upper-cased group id.
    pub name: String,
    pub online: bool,
    pub sensors: Vec<SensorLine>,
    /// `HH:MM:SS` of the report, or `unknown`.
    pub last_update: String,
}

impl GroupCard {
    /// Build the card of `group` with a precomputed online flag.
    #[must_use]
    pub fn new(group: &GroupSnapshot, online: bool) -> Self {
        Self {
            name: group.group_id.to_uppercase(),
            online,
            sensors: group
                .sensor_data
                .iter()
                .map(|(name, value)| SensorLine {
                    name: name.clone(),
                    value: format_value(value),
                })
                .collect(),
            last_update: from_unix_seconds(group.timestamp)
                .map_or_else(|| "unknown".to_string(), format_clock),
        }
    }

    fn state_class(&self) -> &'static str {
        if self.online { "online" } else { "offline" }
    }

    fn label(&self) -> &'static str {
        if self.online { "ONLINE" } else { "OFFLINE" }
    }
}

/// Groups container template: one card per group, or the placeholder.
#[derive(Template)]
#[template(path = "cards.html")]
pub struct CardsTemplate {
    pub cards: Vec<GroupCard>,
}

/// Complete HTML document around the three dashboard slots.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub slots: &'a PageSlots,
    /// Reload cadence of the `<meta http-equiv="refresh">` tag, if any.
    pub refresh_secs: Option<u32>,
}

fn view_error(err: askama::Error) -> GroupBoardError {
    GroupBoardError::View(Box::new(err))
}

/// Render the groups container content.
///
/// One card per group, in input order, each classified by `recency` against
/// `now`. An empty slice yields [`NO_DATA_PLACEHOLDER`].
///
/// # Errors
///
/// Returns [`GroupBoardError::View`] if the template fails to render.
pub fn render_groups<R>(
    groups: &[GroupSnapshot],
    recency: &mut R,
    now: UnixSeconds,
) -> Result<String, GroupBoardError>
where
    R: RecencyPolicy + ?Sized,
{
    let cards = groups
        .iter()
        .map(|group| {
            let online = recency.is_recent(group.timestamp, now);
            GroupCard::new(group, online)
        })
        .collect();
    CardsTemplate { cards }.render().map_err(view_error)
}

/// Render a complete HTML document around the three dashboard slots.
///
/// With `refresh_secs` set the page reloads itself at that cadence.
///
/// # Errors
///
/// Returns [`GroupBoardError::View`] if the template fails to render.
pub fn render_page(slots: &PageSlots, refresh_secs: Option<u32>) -> Result<String, GroupBoardError> {
    PageTemplate {
        slots,
        refresh_secs,
    }
    .render()
    .map_err(view_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupboard_domain::recency::{ReferenceRecency, WallClockRecency};

    fn group(id: &str, timestamp: f64) -> GroupSnapshot {
        GroupSnapshot::builder()
            .group_id(id)
            .timestamp(timestamp)
            .sensor("temperature", 21.0)
            .sensor("state", "ok")
            .build()
            .unwrap()
    }

    fn card_count(html: &str) -> usize {
        html.matches(r#"<div class="group-card "#).count()
    }

    fn render(groups: &[GroupSnapshot], now: UnixSeconds) -> String {
        render_groups(groups, &mut WallClockRecency, now).unwrap()
    }

    #[test]
    fn should_render_placeholder_when_empty() {
        let html = render(&[], 1_000.0);
        assert_eq!(html, NO_DATA_PLACEHOLDER);
        assert_eq!(card_count(&html), 0);
    }

    #[test]
    fn should_render_one_card_per_group_in_input_order() {
        let groups = vec![
            group("group_3", 1_000.0),
            group("group_1", 1_000.0),
            group("group_2", 1_000.0),
        ];
        let html = render(&groups, 1_000.0);

        assert_eq!(card_count(&html), 3);
        let first = html.find("GROUP_3").unwrap();
        let second = html.find("GROUP_1").unwrap();
        let third = html.find("GROUP_2").unwrap();
        assert!(first < second && second < third);
        assert!(!html.contains("No data received"));
    }

    #[test]
    fn should_label_cards_from_recency() {
        let groups = vec![group("group_1", 990.0), group("group_2", 500.0)];
        let html = render(&groups, 1_000.0);

        let split = html.find("GROUP_2").unwrap();
        let (first, second) = html.split_at(split);
        assert!(first.contains(r#"class="group-card online""#));
        assert!(first.contains(">ONLINE<"));
        assert!(second.contains(r#"class="group-status status-offline""#));
        assert!(second.contains(">OFFLINE<"));
    }

    #[test]
    fn should_classify_with_reference_policy_across_groups() {
        let groups = vec![
            group("group_1", 100.0),
            group("group_2", 200.0),
            group("group_3", 50.0),
        ];
        let mut policy = ReferenceRecency::default();
        let html = render_groups(&groups, &mut policy, 0.0).unwrap();

        assert_eq!(policy.reference(), Some(200.0));
        let tail = &html[html.find("GROUP_3").unwrap()..];
        assert!(tail.contains(">OFFLINE<"));
        assert_eq!(html.matches(">ONLINE<").count(), 2);
    }

    #[test]
    fn should_build_card_model_from_snapshot() {
        let card = GroupCard::new(&group("group_1", 3_723.0), false);

        assert_eq!(card.name, "GROUP_1");
        assert_eq!(card.last_update, "01:02:03");
        assert_eq!(
            card.sensors,
            vec![
                SensorLine {
                    name: "temperature".to_string(),
                    value: "21.00".to_string(),
                },
                SensorLine {
                    name: "state".to_string(),
                    value: "ok".to_string(),
                },
            ]
        );
    }

    #[test]
    fn should_render_sensor_lines_with_formatted_values() {
        let html = render(&[group("group_1", 0.0)], 0.0);
        assert!(html.contains(r#"<span class="sensor-name">temperature:</span>"#));
        assert!(html.contains(r#"<span class="sensor-value">21.00</span>"#));
        assert!(html.contains(r#"<span class="sensor-value">ok</span>"#));
        assert!(html.find("temperature").unwrap() < html.find("state").unwrap());
        assert!(html.contains("Last update: 00:00:00"));
    }

    #[test]
    fn should_escape_wire_text() {
        let snapshot = GroupSnapshot::builder()
            .group_id("<b>")
            .timestamp(0.0)
            .sensor("a&b", "<script>")
            .build()
            .unwrap();
        let html = render(&[snapshot], 0.0);
        assert!(html.contains("&lt;B&gt;"));
        assert!(html.contains("a&amp;b:"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn should_render_page_with_three_slots() {
        let slots = PageSlots {
            update_time: "10:00:00".to_string(),
            total_groups: 2,
            groups_html: "<p>cards</p>".to_string(),
        };
        let html = render_page(&slots, None).unwrap();
        assert!(html.contains(r#"<span id="update-time">10:00:00</span>"#));
        assert!(html.contains(r#"<span id="total-groups">2</span>"#));
        assert!(html.contains(r#"<div id="groups-container"><p>cards</p></div>"#));
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn should_add_refresh_meta_when_requested() {
        let html = render_page(&PageSlots::default(), Some(5)).unwrap();
        assert!(html.contains(r#"<meta http-equiv="refresh" content="5">"#));
    }
}
