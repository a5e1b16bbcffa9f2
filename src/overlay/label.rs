//! Text shown next to annotated objects and in the heads-up panel.

use crate::config::SpeedUnit;
use crate::tracker::RenderRecord;

/// `"{class} {speed} {unit}"`, speed rounded to an integer.
pub fn annotation_label(record: &RenderRecord, unit: SpeedUnit) -> String {
    format!("{} {:.0} {}", record.class_label, record.speed, unit)
}

/// The two heads-up lines: id with speed, then acceleration to one decimal.
pub fn hud_lines(record: &RenderRecord) -> [String; 2] {
    [
        format!("ID {} SPD: {:.0}", record.track_id, record.speed),
        format!("ACCEL: {:.1}", record.acceleration),
    ]
}
