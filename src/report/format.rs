//! Plain-text output in the line formats the routing simulators have always
//! produced.

use crate::routing::RoutingTable;
use crate::simulation::{MessageTrace, TraceResult};

/// How table entries without a route are rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreachableStyle {
    /// Leave the line out
    Omit,
    /// Print the entry with this label in the cost column
    Label(String),
}

/// Routing table block: one `destination nextHop cost` line per entry and an
/// empty line after each source.
pub fn format_routing_table(table: &RoutingTable, style: &UnreachableStyle) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (_, row) in table.rows() {
        for entry in row {
            if entry.is_reachable() {
                lines.push(format!("{} {} {}", entry.destination, entry.next_hop, entry.cost));
            } else if let UnreachableStyle::Label(label) = style {
                lines.push(format!("{} {} {}", entry.destination, entry.next_hop, label));
            }
        }
        lines.push(String::new());
    }

    terminated(lines)
}

/// One trace line, without the trailing newline.
pub fn format_trace(trace: &MessageTrace) -> String {
    let message = &trace.message;
    match &trace.result {
        TraceResult::Unreachable { source, destination } => format!(
            "from {} to {} cost infinite hops unreachable message {}",
            source, destination, message.payload
        ),
        TraceResult::Looped { source, destination, cost, .. } => format!(
            "from {} to {} cost {} hops loop message {}",
            source, destination, cost, message.payload
        ),
        TraceResult::Delivered { cost, .. } => {
            let hops: String = trace
                .result
                .intermediates()
                .iter()
                .map(|hop| format!("{} ", hop))
                .collect();
            format!(
                "from {} to {} cost {} hops {} {}message {}",
                message.source, message.destination, cost, message.source, hops, message.payload
            )
        }
    }
}

/// Trace lines for a message batch, optionally followed by an empty line.
pub fn format_traces(traces: &[MessageTrace], trailing_blank: bool) -> String {
    let mut lines: Vec<String> = traces.iter().map(format_trace).collect();
    if trailing_blank {
        lines.push(String::new());
    }
    terminated(lines)
}

/// Join lines, ending every line (including the last) with a newline.
fn terminated(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RoutingEntry;
    use crate::topology::{MessageRecord, INFINITY};

    fn trace(source: usize, destination: usize, payload: &str, result: TraceResult) -> MessageTrace {
        MessageTrace {
            message: MessageRecord { source, destination, payload: payload.to_string() },
            result,
        }
    }

    fn two_islands() -> RoutingTable {
        RoutingTable::from_rows(vec![
            vec![RoutingEntry::direct(0, 0), RoutingEntry::direct(1, INFINITY)],
            vec![RoutingEntry::direct(0, INFINITY), RoutingEntry::direct(1, 0)],
        ])
    }

    #[test]
    fn test_table_omits_unreachable() {
        let text = format_routing_table(&two_islands(), &UnreachableStyle::Omit);
        assert_eq!(text, "0 0 0\n\n1 1 0\n\n");
    }

    #[test]
    fn test_table_labels_unreachable() {
        let text = format_routing_table(&two_islands(), &UnreachableStyle::Label("999".to_string()));
        assert_eq!(text, "0 0 0\n1 1 999\n\n0 0 999\n1 1 0\n\n");
    }

    #[test]
    fn test_delivered_trace_line() {
        let line = format_trace(&trace(
            2,
            1,
            "here is a message from 2 to 1",
            TraceResult::Delivered { hops: vec![2, 0, 3, 1], cost: 6 },
        ));
        assert_eq!(line, "from 2 to 1 cost 6 hops 2 0 3 message here is a message from 2 to 1");
    }

    #[test]
    fn test_direct_and_self_trace_lines() {
        let direct = format_trace(&trace(0, 1, "hi", TraceResult::Delivered { hops: vec![0, 1], cost: 4 }));
        assert_eq!(direct, "from 0 to 1 cost 4 hops 0 message hi");

        let to_self = format_trace(&trace(3, 3, "me", TraceResult::Delivered { hops: vec![3], cost: 0 }));
        assert_eq!(to_self, "from 3 to 3 cost 0 hops 3 message me");
    }

    #[test]
    fn test_unreachable_trace_line() {
        let line = format_trace(&trace(0, 4, "lost", TraceResult::Unreachable { source: 0, destination: 4 }));
        assert_eq!(line, "from 0 to 4 cost infinite hops unreachable message lost");
    }

    #[test]
    fn test_looped_trace_line() {
        let line = format_trace(&trace(
            0,
            3,
            "stuck",
            TraceResult::Looped { source: 0, destination: 3, cost: 0, hops: 6 },
        ));
        assert_eq!(line, "from 0 to 3 cost 0 hops loop message stuck");
    }

    #[test]
    fn test_trace_batch_trailing_blank() {
        let traces = vec![trace(0, 1, "a", TraceResult::Delivered { hops: vec![0, 1], cost: 1 })];
        assert_eq!(format_traces(&traces, true), "from 0 to 1 cost 1 hops 0 message a\n\n");
        assert_eq!(format_traces(&traces, false), "from 0 to 1 cost 1 hops 0 message a\n");
        assert_eq!(format_traces(&[], true), "\n");
    }
}
