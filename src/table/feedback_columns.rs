// The four columns of the feedback table

use super::column::{CellValue, ColumnDef, ColumnKind};
use crate::feedback::Feedback;

/// Name, Email, Rating and Message columns
///
/// Messages longer than `message_limit` characters are cut in the cell;
/// sorting and filtering always see the full text.
pub fn feedback_columns(message_limit: usize) -> Vec<ColumnDef<Feedback>> {
    vec![
        // Sorts and filters on the stored name; the "User {n}" placeholder is display-only
        ColumnDef::new("userName", "Name", ColumnKind::Text, |r: &Feedback| {
            CellValue::text(r.user_name.as_deref().filter(|s| !s.is_empty()))
        })
        .with_formatter(|pos, r: &Feedback| r.display_name(pos)),
        ColumnDef::new("userEmail", "Email", ColumnKind::Text, |r: &Feedback| {
            CellValue::text(r.user_email.as_deref())
        }),
        ColumnDef::new("rating", "Rating", ColumnKind::Numeric, |r: &Feedback| {
            r.rating
                .map(|rating| CellValue::Number(f64::from(rating.value())))
                .unwrap_or(CellValue::Empty)
        })
        .with_formatter(|_, r: &Feedback| r.rating_cell()),
        ColumnDef::new("message", "Message", ColumnKind::Text, |r: &Feedback| {
            CellValue::text(r.message.as_deref().filter(|s| !s.is_empty()))
        })
        .with_formatter(move |_, r: &Feedback| r.compact_message(message_limit)),
    ]
}
