// codec.rs - The flat, line-oriented ledger format.
//
//   <totalPoints>
//   Simple,<name>,<description>,<points>,<completed:true|false>
//   Eternal,<name>,<description>,<points>
//   Checklist,<name>,<description>,<points>,<targetCount>,<currentCount>,<bonusPoints>
//
// Fields are positional and comma-joined with no quoting or escaping, so a
// name or description may not contain a comma or line break; new goals are
// rejected at validation, and a hand-edited record with an extra comma fails
// as malformed rather than being misread.
//
// Decoding is all-or-nothing: the first bad line aborts with an error and
// no registry is produced.

use crate::error::LedgerError;
use crate::goal::{Goal, GoalKind, GoalProgress};
use crate::registry::GoalRegistry;

/// Render one goal as its ledger record.
pub fn encode_goal(goal: &Goal) -> String {
    let head = format!(
        "{},{},{},{}",
        goal.kind().tag(),
        goal.name(),
        goal.description(),
        goal.points()
    );
    match goal.progress() {
        GoalProgress::Simple { completed } => format!("{},{}", head, completed),
        GoalProgress::Eternal => head,
        GoalProgress::Checklist {
            current_count,
            target_count,
            bonus_points,
        } => format!(
            "{},{},{},{}",
            head, target_count, current_count, bonus_points
        ),
    }
}

/// Render a registry as ledger lines: the total, then one record per goal
/// in registry order.
pub fn encode(registry: &GoalRegistry) -> Vec<String> {
    let mut lines = Vec::with_capacity(registry.len() + 1);
    lines.push(registry.total_points().to_string());
    lines.extend(registry.goals().iter().map(encode_goal));
    lines
}

/// Parse ledger lines into a fresh registry.
///
/// Trailing `\r` is stripped from every line and whitespace-only lines
/// after the total are skipped.
pub fn decode<I, S>(lines: I) -> Result<GoalRegistry, LedgerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = lines.into_iter();

    let total_line = lines.next();
    let total_text = total_line
        .as_ref()
        .map(|l| strip_cr(l.as_ref()).trim())
        .unwrap_or("");
    let total = total_text
        .parse::<u64>()
        .map_err(|_| LedgerError::Format {
            line: 1,
            value: total_text.to_string(),
        })?;

    let mut registry = GoalRegistry::with_total(total);
    for (offset, line) in lines.enumerate() {
        let line_no = offset + 2;
        let line = strip_cr(line.as_ref());
        if line.trim().is_empty() {
            continue;
        }
        registry.add(decode_goal(line, line_no)?);
    }
    Ok(registry)
}

/// Parse a single goal record. `line_no` is only used for error reporting.
pub fn decode_goal(line: &str, line_no: usize) -> Result<Goal, LedgerError> {
    let fields: Vec<&str> = line.split(',').collect();
    let kind = GoalKind::from_tag(fields[0]).ok_or_else(|| LedgerError::UnknownKind {
        line: line_no,
        tag: fields[0].to_string(),
    })?;

    let record = Record {
        kind,
        line: line_no,
        fields: &fields,
    };
    record.expect_len(match kind {
        GoalKind::Simple => 5,
        GoalKind::Eternal => 4,
        GoalKind::Checklist => 7,
    })?;

    if fields[1].trim().is_empty() {
        return Err(record.malformed("name must not be empty".to_string()));
    }
    let points = record.number(3, "points")?;
    let progress = match kind {
        GoalKind::Simple => GoalProgress::Simple {
            completed: record.flag(4, "completed")?,
        },
        GoalKind::Eternal => GoalProgress::Eternal,
        GoalKind::Checklist => {
            let target_count = record.number(4, "target count")?;
            let current_count = record.number(5, "current count")?;
            let bonus_points = record.number(6, "bonus points")?;
            if target_count == 0 {
                return Err(record.malformed("target count must be > 0".to_string()));
            }
            if current_count > target_count {
                return Err(record.malformed(format!(
                    "current count {} exceeds target count {}",
                    current_count, target_count
                )));
            }
            GoalProgress::Checklist {
                current_count,
                target_count,
                bonus_points,
            }
        }
    };

    Ok(Goal::from_parts(fields[1], fields[2], points, progress))
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// A split record being decoded, for field access with located errors.
struct Record<'a> {
    kind: GoalKind,
    line: usize,
    fields: &'a [&'a str],
}

impl Record<'_> {
    fn malformed(&self, reason: String) -> LedgerError {
        LedgerError::MalformedRecord {
            line: self.line,
            kind: self.kind.tag().to_string(),
            reason,
        }
    }

    fn expect_len(&self, expected: usize) -> Result<(), LedgerError> {
        if self.fields.len() != expected {
            return Err(self.malformed(format!(
                "expected {} fields, found {}",
                expected,
                self.fields.len()
            )));
        }
        Ok(())
    }

    fn number(&self, idx: usize, what: &str) -> Result<u32, LedgerError> {
        let raw = self.fields[idx];
        raw.trim().parse::<u32>().map_err(|_| {
            self.malformed(format!(
                "{} is not a non-negative integer: {:?}",
                what, raw
            ))
        })
    }

    // Accepts `True`/`False` too, as written by older ledgers.
    fn flag(&self, idx: usize, what: &str) -> Result<bool, LedgerError> {
        let raw = self.fields[idx].trim();
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(self.malformed(format!("{} is not true or false: {:?}", what, raw)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::GoalRequest;

    fn sample_registry() -> GoalRegistry {
        let mut reg = GoalRegistry::new();
        reg.add(
            GoalRequest::simple("Read scriptures", "daily", 100)
                .build()
                .unwrap(),
        );
        reg.add(GoalRequest::eternal("Pray", "morning", 25).build().unwrap());
        reg.add(
            GoalRequest::checklist("Exercise", "30 min", 50, 3, 20)
                .build()
                .unwrap(),
        );
        reg.record_event_at(1).unwrap();
        reg.record_event_at(3).unwrap();
        reg
    }

    #[test]
    fn encode_writes_total_then_records() {
        let lines = encode(&sample_registry());
        assert_eq!(
            lines,
            vec![
                "150",
                "Simple,Read scriptures,daily,100,true",
                "Eternal,Pray,morning,25",
                "Checklist,Exercise,30 min,50,3,1,20",
            ]
        );
    }

    #[test]
    fn decode_restores_behavior() {
        let reg = sample_registry();
        let mut restored = decode(encode(&reg)).unwrap();
        assert_eq!(restored, reg);

        // The simple goal stays completed; the checklist resumes at 1/3.
        assert_eq!(restored.record_event_at(1).unwrap(), 0);
        assert_eq!(restored.record_event_at(3).unwrap(), 50);
        assert_eq!(restored.record_event_at(3).unwrap(), 70);
    }

    #[test]
    fn decode_empty_input_is_format_error() {
        let lines: Vec<String> = Vec::new();
        assert!(matches!(
            decode(lines),
            Err(LedgerError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn decode_non_integer_total_is_format_error() {
        let err = decode(["lots", "Eternal,Pray,morning,25"]).unwrap_err();
        match err {
            LedgerError::Format { line, value } => {
                assert_eq!(line, 1);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_unknown_kind_reports_line() {
        let err = decode(["0", "Eternal,Pray,morning,25", "Weekly,Run,5k,10"]).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::UnknownKind { line: 3, ref tag } if tag == "Weekly"
        ));
    }

    #[test]
    fn decode_wrong_field_count_is_malformed() {
        for line in [
            "Simple,Read,daily,100",
            "Eternal,Pray,morning,25,extra",
            "Checklist,Run,5k,10,3,1",
            "Simple,Read, with comma,daily,100,false",
        ] {
            let err = decode(["0", line]).unwrap_err();
            assert!(
                matches!(err, LedgerError::MalformedRecord { line: 2, .. }),
                "{line} -> {err}"
            );
        }
    }

    #[test]
    fn decode_bad_field_values_are_malformed() {
        for line in [
            "Simple,Read,daily,-100,false",
            "Simple,Read,daily,100,maybe",
            "Checklist,Run,5k,10,0,0,5",
            "Checklist,Run,5k,10,3,4,5",
            "Eternal,Pray,morning,lots",
            "Simple,,daily,5,false",
            "Eternal,  ,morning,5",
        ] {
            assert!(
                matches!(
                    decode(["0", line]),
                    Err(LedgerError::MalformedRecord { .. })
                ),
                "{line}"
            );
        }
    }

    #[test]
    fn decode_accepts_capitalized_flags_and_crlf() {
        let reg = decode(["20\r", "Simple,Read,daily,100,True\r", "", "Simple,Walk,park,5,False"])
            .unwrap();
        assert_eq!(reg.total_points(), 20);
        assert_eq!(reg.len(), 2);
        assert!(reg.goals()[0].is_completed());
        assert!(!reg.goals()[1].is_completed());
    }
}
