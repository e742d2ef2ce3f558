//! Graphviz DOT export.
//!
//! Renders the configured states and transitions of a machine together
//! with its current state. Only the introspection surface of
//! [`Configuration`](crate::config::Configuration) is used.

use crate::core::{Event, State};
use crate::engine::StateMachine;
use std::fmt;

const GUARDED_SUFFIX: &str = " (guarded)";

/// Lazily rendered DOT graph; use `to_string()` or `{}` to produce text.
pub struct Dot<'a, S: State, E: Event> {
    machine: &'a StateMachine<S, E>,
}

impl<S: State, E: Event> StateMachine<S, E> {
    pub fn dot(&self) -> Dot<'_, S, E> {
        Dot { machine: self }
    }

    /// Render the machine as a DOT digraph.
    pub fn to_dot(&self) -> String {
        self.dot().to_string()
    }
}

/// One `from -> to` edge with every event label that uses it.
struct Edge<'a, S> {
    from: &'a S,
    to: &'a S,
    labels: Vec<String>,
    guarded: bool,
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

impl<S: State, E: Event> fmt::Display for Dot<'_, S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.machine.configuration();
        let current = self.machine.current();

        writeln!(f, "digraph FSM {{")?;
        writeln!(f, "  rankdir=LR;")?;
        writeln!(
            f,
            "  node [shape=circle, style=filled, fillcolor=\"#f8f8f8\", color=\"#444444\", fontname=\"Helvetica\"];"
        )?;
        writeln!(f, "  edge [fontname=\"Helvetica\", fontsize=10];")?;
        writeln!(f)?;
        writeln!(f, "  __start [shape=point, style=invis];")?;
        writeln!(
            f,
            "  __start -> \"{}\" [label=\" initial\"];",
            escape(config.initial().name())
        )?;
        writeln!(f)?;

        let mut edges: Vec<Edge<'_, S>> = Vec::new();
        for info in config.transitions() {
            let mut label = info.event.name().to_string();
            if info.guarded {
                label.push_str(GUARDED_SUFFIX);
            }
            match edges
                .iter_mut()
                .find(|e| e.from == info.from && e.to == info.to)
            {
                Some(edge) => {
                    edge.labels.push(label);
                    edge.guarded |= info.guarded;
                }
                None => edges.push(Edge {
                    from: info.from,
                    to: info.to,
                    labels: vec![label],
                    guarded: info.guarded,
                }),
            }
        }

        for state in config.states() {
            let mut attrs = vec![format!("label=\"{}\"", escape(state.name()))];

            if state == *current {
                attrs.push("fillcolor=\"#90ee90\"".to_string());
                attrs.push("shape=doublecircle".to_string());
            } else if !config.has_outgoing(&state) {
                attrs.push("fillcolor=\"#d3d3d3\"".to_string());
                attrs.push("shape=doublecircle".to_string());
            }

            let mut tooltips = Vec::new();
            if config.has_entry_callbacks(&state) {
                tooltips.push("OnEnter");
            }
            if config.has_exit_callbacks(&state) {
                tooltips.push("OnExit");
            }
            if !tooltips.is_empty() {
                attrs.push(format!("tooltip=\"{}\"", tooltips.join("\\n")));
            }

            writeln!(f, "  \"{}\" [{}];", escape(state.name()), attrs.join(", "))?;
        }
        writeln!(f)?;

        for edge in &edges {
            let labels: Vec<String> = edge.labels.iter().map(|l| escape(l)).collect();
            let mut attrs = vec![format!("label=\" {} \"", labels.join("\\n"))];
            if edge.guarded {
                attrs.push("style=dashed".to_string());
                attrs.push("color=red".to_string());
                attrs.push("arrowhead=odiamond".to_string());
            }
            writeln!(
                f,
                "  \"{}\" -> \"{}\" [{}];",
                escape(edge.from.name()),
                escape(edge.to.name()),
                attrs.join(", ")
            )?;
        }

        writeln!(f)?;
        writeln!(f, "  subgraph cluster_legend {{")?;
        writeln!(f, "    label = \"Legend\";")?;
        writeln!(f, "    style = dashed;")?;
        writeln!(f, "    key [label=<")?;
        writeln!(f, "      <table border=\"0\" cellpadding=\"4\" cellspacing=\"0\" cellborder=\"0\">")?;
        writeln!(f, "        <tr><td align=\"right\">●</td><td>Regular state</td></tr>")?;
        writeln!(f, "        <tr><td align=\"right\"><font color=\"green\">◎</font></td><td>Current state</td></tr>")?;
        writeln!(f, "        <tr><td align=\"right\"><font color=\"gray\">◎</font></td><td>Final state</td></tr>")?;
        writeln!(f, "        <tr><td align=\"right\"><font color=\"red\">→</font></td><td>Guarded transition</td></tr>")?;
        writeln!(f, "      </table>")?;
        writeln!(f, "    >, shape=none];")?;
        writeln!(f, "  }}")?;
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;

    fn machine() -> StateMachine<&'static str, &'static str> {
        StateMachineBuilder::new()
            .initial("idle")
            .transition("idle", "start", "running")
            .transition("idle", "kick", "running")
            .transition_when("running", "stop", "stopped", |_| true)
            .on_enter("running", |_| Ok(()))
            .on_exit("running", |_| Ok(()))
            .build()
            .unwrap()
    }

    #[test]
    fn dot_marks_initial_and_current() {
        let dot = machine().to_dot();

        assert!(dot.starts_with("digraph FSM {"));
        assert!(dot.contains("__start -> \"idle\""));
        assert!(dot.contains(
            "\"idle\" [label=\"idle\", fillcolor=\"#90ee90\", shape=doublecircle];"
        ));
    }

    #[test]
    fn dot_marks_terminal_states_and_callbacks() {
        let dot = machine().to_dot();

        assert!(dot.contains(
            "\"stopped\" [label=\"stopped\", fillcolor=\"#d3d3d3\", shape=doublecircle];"
        ));
        assert!(dot.contains("\"running\" [label=\"running\", tooltip=\"OnEnter\\nOnExit\"];"));
    }

    #[test]
    fn dot_groups_parallel_edges() {
        let dot = machine().to_dot();

        assert!(dot.contains("\"idle\" -> \"running\" [label=\" start\\nkick \"];"));
        assert!(dot.contains(
            "\"running\" -> \"stopped\" [label=\" stop (guarded) \", style=dashed, color=red, arrowhead=odiamond];"
        ));
    }

    #[test]
    fn dot_follows_current_state() {
        let mut machine = machine();
        machine.trigger("start").unwrap();

        let dot = machine.to_dot();

        assert!(dot.contains("\"idle\" [label=\"idle\"];"));
        assert!(dot.contains("fillcolor=\"#90ee90\", shape=doublecircle, tooltip="));
    }

    #[test]
    fn labels_are_escaped() {
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
    }
}
