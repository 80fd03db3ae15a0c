//! Scheduling result (roster) model.
//!
//! The external-facing shape of a finished roster: per template shift, one
//! item per staffed weekday carrying the principal (if any) and the helper
//! assistants. Serializes to the JSON shape consumed by the service's HTTP
//! layer.

use serde::{Deserialize, Serialize};

/// Staffing of one (shift, day) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultShiftItem {
    /// Weekday, 1..=7.
    pub day: u8,
    /// Designated principal, `None` when no eligible user was available.
    #[serde(rename = "principalID")]
    pub principal_id: Option<i64>,
    /// Helper assistants, distinct and never containing the principal.
    #[serde(rename = "assistantIDs")]
    pub assistant_ids: Vec<i64>,
}

impl ResultShiftItem {
    /// Creates a new item.
    pub fn new(day: u8, principal_id: Option<i64>, assistant_ids: Vec<i64>) -> Self {
        Self {
            day,
            principal_id,
            assistant_ids,
        }
    }

    /// Total assistants staffed in this cell, principal included.
    pub fn headcount(&self) -> usize {
        self.assistant_ids.len() + usize::from(self.principal_id.is_some())
    }
}

/// Roster rows for one template shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultShift {
    /// Template shift this entry covers.
    #[serde(rename = "shiftID")]
    pub shift_id: i64,
    /// One item per applicable weekday. Empty when the shift has none.
    pub items: Vec<ResultShiftItem>,
}

impl ResultShift {
    /// Creates an entry with no items.
    pub fn new(shift_id: i64) -> Self {
        Self {
            shift_id,
            items: Vec::new(),
        }
    }

    /// Adds an item.
    pub fn with_item(mut self, item: ResultShiftItem) -> Self {
        self.items.push(item);
        self
    }

    /// Finds the item for a weekday.
    pub fn item_for_day(&self, day: u8) -> Option<&ResultShiftItem> {
        self.items.iter().find(|i| i.day == day)
    }
}

/// A complete weekly roster for a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingResult {
    /// Plan this roster was produced for.
    #[serde(rename = "schedulePlanID")]
    pub schedule_plan_id: i64,
    /// One entry per template shift.
    pub shifts: Vec<ResultShift>,
}

impl SchedulingResult {
    /// Creates an empty roster.
    pub fn new(schedule_plan_id: i64) -> Self {
        Self {
            schedule_plan_id,
            shifts: Vec::new(),
        }
    }

    /// Wraps already-assembled shift entries.
    pub fn with_shifts(mut self, shifts: Vec<ResultShift>) -> Self {
        self.shifts = shifts;
        self
    }

    /// Finds the entry for a template shift.
    pub fn shift_by_id(&self, shift_id: i64) -> Option<&ResultShift> {
        self.shifts.iter().find(|s| s.shift_id == shift_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headcount() {
        assert_eq!(ResultShiftItem::new(1, Some(9), vec![1, 2]).headcount(), 3);
        assert_eq!(ResultShiftItem::new(1, None, vec![1, 2]).headcount(), 2);
        assert_eq!(ResultShiftItem::new(1, None, vec![]).headcount(), 0);
    }

    #[test]
    fn test_item_for_day() {
        let shift = ResultShift::new(5)
            .with_item(ResultShiftItem::new(1, Some(9), vec![2]))
            .with_item(ResultShiftItem::new(3, None, vec![]));

        assert_eq!(shift.item_for_day(1).and_then(|i| i.principal_id), Some(9));
        assert!(shift.item_for_day(2).is_none());
    }

    #[test]
    fn test_wire_shape() {
        let result = SchedulingResult::new(12).with_shifts(vec![ResultShift::new(5)
            .with_item(ResultShiftItem::new(1, Some(9), vec![2, 3]))
            .with_item(ResultShiftItem::new(2, None, vec![]))]);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "schedulePlanID": 12,
                "shifts": [{
                    "shiftID": 5,
                    "items": [
                        { "day": 1, "principalID": 9, "assistantIDs": [2, 3] },
                        { "day": 2, "principalID": null, "assistantIDs": [] },
                    ],
                }],
            })
        );

        let back: SchedulingResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }
}
