//! Header fixtures for the classification smoke benchmark.

/// Signals carried by every [`edge_header`] value.
pub const EDGE_HEADER_SIGNAL_COUNT: usize = 9;

/// Builds a realistic edge header with the given score.
pub fn edge_header(score: i32) -> String {
    format!(
        "uuid=964d54b7-0821-413a-a4d6-8131770ec8d5;requestid=r{score};status=0;score={score};risk=udfp:1325;trust=ugp:us;general=di:1;allow=0;action=monitor"
    )
}
