//! End-to-end scenarios run through the library's script runner.

use compdeps::console::{run_script, InputMode, Session, SessionConfig};
use compdeps::graph::{CycleCheck, DependencyGraph, Event};

fn run(script: &str) -> (DependencyGraph, Vec<String>) {
    let mut session = Session::new(Vec::new());
    run_script(script.as_bytes(), &mut session, InputMode::Unbounded).unwrap();
    let (graph, out) = session.into_parts();
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (graph, lines)
}

fn position(lines: &[String], needle: &str) -> usize {
    lines
        .iter()
        .position(|l| l == needle)
        .unwrap_or_else(|| panic!("'{}' not in transcript {:?}", needle, lines))
}

#[test]
fn telnet_scenario() {
    let (graph, lines) = run("DEPEND TELNET TCPIP NETCARD\n\
         INSTALL TELNET\n\
         INSTALL TELNET\n\
         REMOVE TCPIP\n\
         REMOVE TELNET\n\
         LIST\n");

    // first install: dependencies before TELNET
    let first_install = position(&lines, "INSTALL TELNET");
    let telnet = position(&lines, "Installing TELNET");
    assert!(position(&lines, "Installing TCPIP") > first_install);
    assert!(position(&lines, "Installing NETCARD") > first_install);
    assert!(position(&lines, "Installing TCPIP") < telnet);
    assert!(position(&lines, "Installing NETCARD") < telnet);

    // second install: three notices, nothing installed
    let second_install = telnet + 1;
    assert_eq!(lines[second_install], "INSTALL TELNET");
    let mut notices = lines[second_install + 1..second_install + 4].to_vec();
    notices.sort();
    assert_eq!(
        notices,
        vec![
            "NETCARD is already installed.",
            "TCPIP is already installed.",
            "TELNET is already installed.",
        ]
    );

    let remove_tcpip = position(&lines, "REMOVE TCPIP");
    assert_eq!(lines[remove_tcpip + 1], "TCPIP is still needed.");

    let remove_telnet = position(&lines, "REMOVE TELNET");
    let mut removed = lines[remove_telnet + 1..remove_telnet + 4].to_vec();
    assert_eq!(removed[2], "Removed TELNET");
    removed.sort();
    assert_eq!(removed, vec!["Removed NETCARD", "Removed TCPIP", "Removed TELNET"]);

    assert_eq!(lines.last().map(String::as_str), Some("LIST"));
    assert!(graph.list_installed().is_empty());
}

#[test]
fn classic_transcript() {
    let script = "DEPEND TELNET TCPIP NETCARD
DEPEND TCPIP NETCARD
DEPEND DNS TCPIP NETCARD
DEPEND BROWSER TCPIP HTML
INSTALL NETCARD
INSTALL TELNET
INSTALL foo
REMOVE NETCARD
INSTALL BROWSER
INSTALL DNS
LIST
REMOVE TELNET
REMOVE NETCARD
REMOVE DNS
REMOVE NETCARD
INSTALL NETCARD
REMOVE TCPIP
REMOVE BROWSER
REMOVE TCPIP
LIST
END
";
    let (graph, lines) = run(script);

    assert!(lines.contains(&"NETCARD is still needed.".to_string()));
    assert!(lines.contains(&"TCPIP is still needed.".to_string()));
    assert!(lines.contains(&"Installing foo".to_string()));
    assert!(lines.contains(&"Removed BROWSER".to_string()));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("Encountered END command. Exiting program.")
    );

    // removing BROWSER unwinds TCPIP and NETCARD once nothing else uses them
    assert!(lines.contains(&"Removed NETCARD".to_string()));
    assert_eq!(graph.list_installed(), vec!["foo"]);
}

#[test]
fn removal_guard_property() {
    let mut graph = DependencyGraph::new();
    graph.declare_dependency("A", &["B"]).unwrap();
    graph.install("A");
    graph.install("B");

    assert_eq!(graph.remove("B"), vec![Event::StillNeeded("B".into())]);
    assert!(graph.is_installed("B"));

    assert!(graph.remove("A").contains(&Event::Removed("A".into())));
    graph.remove("B");
    assert!(!graph.is_installed("A"));
    assert!(!graph.is_installed("B"));
}

#[test]
fn immediate_cycle_rejection_leaves_graph_unchanged() {
    let (graph, lines) = run("DEPEND A B\nDEPEND B A\nDEPEND X X\n");

    assert_eq!(graph.edges(), vec![("A", "B")]);
    assert!(graph.dependencies_of("X").is_empty());
    assert!(lines.contains(&"A depends on B, ignoring command".to_string()));
    assert!(lines.contains(&"X depends on X, ignoring command".to_string()));
}

#[test]
fn transitive_cycle_check_through_session() {
    let config = SessionConfig {
        cycle_check: CycleCheck::Transitive,
        echo_edges: false,
    };
    let mut session = Session::with_config(Vec::new(), config);
    run_script(
        "DEPEND A B\nDEPEND B C\nDEPEND C A\n".as_bytes(),
        &mut session,
        InputMode::Unbounded,
    )
    .unwrap();

    assert!(session.graph().detect_cycles().is_empty());
    assert!(session.graph().dependencies_of("C").is_empty());
}

#[test]
fn symmetry_after_many_declarations() {
    let (graph, _) = run("DEPEND A B C D\n\
         DEPEND B C\n\
         DEPEND C D E\n\
         DEPEND E A\n\
         DEPEND D B\n\
         DEPEND B A\n");

    let edges = graph.edges();
    for (from, to) in &edges {
        assert!(graph.dependents_of(to).contains(from));
        assert!(graph.dependencies_of(from).contains(to));
    }
    let reverse_total: usize = graph
        .components()
        .iter()
        .map(|c| graph.dependents_of(c).len())
        .sum();
    assert_eq!(reverse_total, edges.len());
}
