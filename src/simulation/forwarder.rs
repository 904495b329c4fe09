//! Message forwarding along computed next hops.

use log::error;
use serde::Serialize;

use crate::routing::{RoutingError, RoutingTable};
use crate::topology::{Cost, MessageRecord, NodeId};

/// Outcome of forwarding one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TraceResult {
    /// Delivered along `hops`, source and destination inclusive
    Delivered { hops: Vec<NodeId>, cost: Cost },
    Unreachable { source: NodeId, destination: NodeId },
    /// The table has a finite route but its next-hop chain never reaches the
    /// destination; `hops` is how far the walk went before giving up
    Looped {
        source: NodeId,
        destination: NodeId,
        cost: Cost,
        hops: usize,
    },
}

impl TraceResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, TraceResult::Delivered { .. })
    }

    /// Nodes strictly between source and destination.
    pub fn intermediates(&self) -> &[NodeId] {
        match self {
            TraceResult::Delivered { hops, .. } if hops.len() > 2 => &hops[1..hops.len() - 1],
            _ => &[],
        }
    }
}

/// A message paired with how it was forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTrace {
    pub message: MessageRecord,
    pub result: TraceResult,
}

/// Follow next hops from `source` until `destination` is reached.
///
/// An infinite table cost means unreachable regardless of the recorded next
/// hop. More than `n` hops on a finite route means the table is inconsistent.
pub fn trace_route(
    table: &RoutingTable,
    source: NodeId,
    destination: NodeId,
) -> Result<TraceResult, RoutingError> {
    let n = table.node_count();
    for node in [source, destination] {
        if node >= n {
            return Err(RoutingError::NodeOutOfRange { node, node_count: n });
        }
    }

    let entry = table.entry(source, destination);
    if !entry.is_reachable() {
        return Ok(TraceResult::Unreachable { source, destination });
    }

    let mut hops = vec![source];
    let mut current = source;
    while current != destination {
        if hops.len() > n {
            return Err(RoutingError::ForwardingLoop {
                from: source,
                to: destination,
                hops: hops.len() - 1,
            });
        }
        current = table.entry(current, destination).next_hop;
        hops.push(current);
    }

    Ok(TraceResult::Delivered { hops, cost: entry.cost })
}

/// Forward a single message record.
///
/// A next-hop loop only affects this message: it is recorded as
/// [`TraceResult::Looped`] so the rest of the batch is still forwarded.
/// Out-of-range node ids remain an error.
pub fn forward(table: &RoutingTable, message: &MessageRecord) -> Result<MessageTrace, RoutingError> {
    let result = match trace_route(table, message.source, message.destination) {
        Err(RoutingError::ForwardingLoop { from, to, hops }) => {
            error!(
                "Next-hop loop forwarding from {} to {}: gave up after {} hops",
                from, to, hops
            );
            TraceResult::Looped {
                source: from,
                destination: to,
                cost: table.entry(from, to).cost,
                hops,
            }
        }
        other => other?,
    };
    Ok(MessageTrace {
        message: message.clone(),
        result,
    })
}

/// Forward every message, in input order.
pub fn replay(table: &RoutingTable, messages: &[MessageRecord]) -> Result<Vec<MessageTrace>, RoutingError> {
    messages.iter().map(|message| forward(table, message)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RoutingEntry;
    use crate::topology::INFINITY;

    fn line_table() -> RoutingTable {
        // 0 - 1 - 2 with unit costs
        RoutingTable::from_rows(vec![
            vec![RoutingEntry::direct(0, 0), RoutingEntry::direct(1, 1), RoutingEntry { destination: 2, next_hop: 1, cost: 2 }],
            vec![RoutingEntry::direct(0, 1), RoutingEntry::direct(1, 0), RoutingEntry::direct(2, 1)],
            vec![RoutingEntry { destination: 0, next_hop: 1, cost: 2 }, RoutingEntry::direct(1, 1), RoutingEntry::direct(2, 0)],
        ])
    }

    #[test]
    fn test_trace_through_intermediate() {
        let result = trace_route(&line_table(), 0, 2).unwrap();
        assert_eq!(result, TraceResult::Delivered { hops: vec![0, 1, 2], cost: 2 });
        assert_eq!(result.intermediates(), &[1]);
    }

    #[test]
    fn test_trace_to_self() {
        let result = trace_route(&line_table(), 1, 1).unwrap();
        assert_eq!(result, TraceResult::Delivered { hops: vec![1], cost: 0 });
        assert!(result.intermediates().is_empty());
    }

    #[test]
    fn test_unreachable() {
        let table = RoutingTable::unconnected(2);
        let result = trace_route(&table, 0, 1).unwrap();
        assert_eq!(result, TraceResult::Unreachable { source: 0, destination: 1 });
        assert!(!result.is_delivered());
    }

    #[test]
    fn test_loop_is_reported() {
        let table = RoutingTable::from_rows(vec![
            vec![RoutingEntry::direct(0, 0), RoutingEntry::direct(1, 1), RoutingEntry { destination: 2, next_hop: 1, cost: 5 }],
            vec![RoutingEntry::direct(0, 1), RoutingEntry::direct(1, 0), RoutingEntry { destination: 2, next_hop: 0, cost: 4 }],
            vec![RoutingEntry::direct(0, INFINITY), RoutingEntry::direct(1, INFINITY), RoutingEntry::direct(2, 0)],
        ]);
        let err = trace_route(&table, 0, 2).unwrap_err();
        assert!(matches!(err, RoutingError::ForwardingLoop { from: 0, to: 2, .. }));

        let messages = vec![
            MessageRecord { source: 0, destination: 2, payload: "stuck".to_string() },
            MessageRecord { source: 0, destination: 1, payload: "fine".to_string() },
        ];
        let traces = replay(&table, &messages).unwrap();
        assert_eq!(
            traces[0].result,
            TraceResult::Looped { source: 0, destination: 2, cost: 5, hops: 3 }
        );
        assert!(!traces[0].result.is_delivered());
        assert!(traces[0].result.intermediates().is_empty());
        assert_eq!(traces[1].result, TraceResult::Delivered { hops: vec![0, 1], cost: 1 });
    }

    #[test]
    fn test_out_of_range_message() {
        let message = MessageRecord { source: 0, destination: 9, payload: "hi".to_string() };
        assert!(matches!(
            forward(&line_table(), &message),
            Err(RoutingError::NodeOutOfRange { node: 9, node_count: 3 })
        ));
    }

    #[test]
    fn test_replay_keeps_order_and_payload() {
        let messages = vec![
            MessageRecord { source: 2, destination: 0, payload: "first".to_string() },
            MessageRecord { source: 0, destination: 1, payload: "second".to_string() },
        ];
        let traces = replay(&line_table(), &messages).unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].message.payload, "first");
        assert_eq!(traces[0].result, TraceResult::Delivered { hops: vec![2, 1, 0], cost: 2 });
        assert_eq!(traces[1].result, TraceResult::Delivered { hops: vec![0, 1], cost: 1 });
    }
}
