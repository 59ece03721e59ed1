use models::Connection;
use std::collections::HashSet;

/// Ids of every item transitively connected to `start`, including `start`
/// itself.
///
/// Connections are treated as undirected: money flows through a wire no
/// matter which way the user happened to draw it, and the side tags only
/// matter to the renderer. The set grows by repeated full scans of the
/// connection list until a scan adds nothing. Canvases hold tens of items,
/// so the O(items x connections) worst case is acceptable; switch to an
/// adjacency-list BFS if canvases ever grow past that.
///
/// Ids that resolve to no item still propagate reachability, which keeps a
/// chain alive across a stale reference; the accumulation simply never
/// finds a value for them.
pub fn connected_items(start: &str, connections: &[Connection]) -> HashSet<String> {
    let mut connected: HashSet<String> = HashSet::new();
    connected.insert(start.to_string());

    let mut grew = true;
    while grew {
        grew = false;
        for conn in connections {
            if connected.contains(&conn.from) && !connected.contains(&conn.to) {
                connected.insert(conn.to.clone());
                grew = true;
            }
            if connected.contains(&conn.to) && !connected.contains(&conn.from) {
                connected.insert(conn.from.clone());
                grew = true;
            }
        }
    }

    connected
}
