// src/game/render.rs

//! Text rendering of a turn: strengths, routes and the portal diagram.

use crate::core::{Bitstring, Distribution};

/// Shown for universes missing from a table.
const ABSENT: &str = "00.00%";

/// Strength of `label` as a percentage right-aligned to six columns.
pub fn percentage(table: &Distribution, label: &str) -> String {
    let text = match table.get(label) {
        None => ABSENT.to_string(),
        Some(p) => {
            let rounded = (p * 10_000.0).round() / 100.0;
            if rounded.fract() == 0.0 { format!("{:.1}%", rounded) } else { format!("{}%", rounded) }
        }
    };
    format!("{:>6}", text)
}

/// A way to reach one of the strongest universes.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub universe: String,
    /// 1-based portals to pass through, in any order.
    pub portals: Vec<usize>,
    pub strength: f64,
}

impl Route {
    pub fn describe(&self, table: &Distribution) -> String {
        let portals: String = self.portals.iter().map(|p| format!("{}--", p)).collect();
        format!(
            "    * The route --{} leads to a universe with strength {}",
            portals,
            percentage(table, &self.universe)
        )
    }
}

/// Routes to the `count` strongest universes of `table`, leaving out the
/// current position itself.
pub fn routes(table: &Distribution, position: &Bitstring, count: usize) -> Vec<Route> {
    table
        .ranked()
        .into_iter()
        .take(count)
        .filter(|(label, _)| *label != position.as_str())
        .filter_map(|(label, strength)| {
            let universe = Bitstring::new(label).ok().filter(|b| b.len() == position.len())?;
            let portals = position.differing_positions(&universe).into_iter().map(|m| m + 1).collect();
            Some(Route { universe: label.to_string(), portals, strength })
        })
        .collect()
}

/// Diagram of the portals around `position` with the strength behind each.
///
/// Five-bit universes get the pentagon diagram; other sizes get
/// a plain list. When `show_current` is false the centre is labelled instead
/// of showing the current universe's own strength.
pub fn portal_diagram(table: &Distribution, position: &Bitstring, show_current: bool) -> String {
    let neighbours: Vec<String> = position.neighbours().iter().map(|b| percentage(table, b.as_str())).collect();
    let here = percentage(table, position.as_str());
    if neighbours.len() != 5 {
        let mut lines = vec![if show_current {
            format!("  Current universe {}  {}", position, here)
        } else {
            format!("  Current universe {}", position)
        }];
        for (m, (neighbour, strength)) in position.neighbours().iter().zip(&neighbours).enumerate() {
            lines.push(format!("  [{}] -> {}  {}", m + 1, neighbour, strength));
        }
        return lines.join("\n") + "\n";
    }

    let centre = if show_current {
        [
            "                   ·             ·                  ".to_string(),
            format!("                   ·    {}   ·                  ", here),
            "                   ·             ·                  ".to_string(),
        ]
    } else {
        [
            "                   ·    Your     ·                  ".to_string(),
            "                   ·   current   ·                  ".to_string(),
            "                   ·   universe  ·                  ".to_string(),
        ]
    };
    let [n1, n2, n3, n4, n5] = [&neighbours[0], &neighbours[1], &neighbours[2], &neighbours[3], &neighbours[4]];
    let mut lines = vec![
        String::new(),
        "                     |  |   |  |                    ".to_string(),
        "                     |. · ˙ · .|                    ".to_string(),
        "                    ·           ·                   ".to_string(),
        "                   ·             ·                  ".to_string(),
        format!("                   ·    {}   ·                  ", n1),
        "                   ·             ·                  ".to_string(),
        "----. · ˙ · .       ·           ·      . · ˙ · .----".to_string(),
        "  ·           ·       ˙·  .  ·˙      ·           ·  ".to_string(),
        "-·             ·          |         ·             ·-".to_string(),
        format!(" ·    {}   ·         [1]        ·    {}   · ", n5, n2),
        r"-·             ·\         |        /·             ·-".to_string(),
        "  ·           · [5]   . · ˙ · .  [2] ·           ·  ".to_string(),
        r"----˙·  .  ·˙     \ ·           ·/     ˙·  .  ·˙----".to_string(),
    ];
    lines.extend(centre);
    lines.extend([
        "                    ·           ·                   ".to_string(),
        r"                    / ˙·  .  ·˙  \                  ".to_string(),
        "      . · ˙ · .   [4]            [3]  . · ˙ · .     ".to_string(),
        r"    ·           · /                \·           ·   ".to_string(),
        "   ·             ·                 ·             ·  ".to_string(),
        format!("   ·    {}   ·                 ·    {}   ·  ", n4, n3),
        "   ·             ·                 ·             ·  ".to_string(),
        "    ·           ·                   ·           ·   ".to_string(),
        "     |˙·  .  ·˙|                     |˙·  .  ·˙|    ".to_string(),
        "     |  |   |  |                     |  |   |  |    ".to_string(),
        String::new(),
    ]);
    lines.join("\n") + "\n"
}

/// "1, 2, 3, 4 or 5" for five portals.
pub fn portal_list(n: usize) -> String {
    match n {
        0 => String::new(),
        1 => "1".to_string(),
        _ => {
            let head: Vec<String> = (1..n).map(|d| d.to_string()).collect();
            format!("{} or {}", head.join(", "), n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QreativeError;

    fn table(entries: &[(&str, f64)]) -> Distribution {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn percentages_are_six_wide() {
        let t = table(&[("00", 1.0), ("01", 0.5), ("10", 0.123456)]);
        assert_eq!(percentage(&t, "00"), "100.0%");
        assert_eq!(percentage(&t, "01"), " 50.0%");
        assert_eq!(percentage(&t, "10"), "12.35%");
        assert_eq!(percentage(&t, "11"), "00.00%");
    }

    #[test]
    fn routes_skip_the_current_universe() -> Result<(), QreativeError> {
        let t = table(&[("00000", 0.5), ("10100", 0.3), ("11111", 0.1), ("00001", 0.1)]);
        let here = Bitstring::new("00000")?;
        let found = routes(&t, &here, 3);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].portals, vec![1, 3]);
        assert_eq!(found[1].universe, "00001");
        assert!(found[0].describe(&t).contains("--1--3--"));
        Ok(())
    }

    #[test]
    fn pentagon_shows_every_neighbour() -> Result<(), QreativeError> {
        let t = table(&[("10000", 0.25), ("00001", 0.75), ("00000", 0.0)]);
        let here = Bitstring::new("00000")?;
        let diagram = portal_diagram(&t, &here, true);
        assert!(diagram.contains(" 25.0%"));
        assert!(diagram.contains(" 75.0%"));
        assert!(diagram.contains("  0.0%"));
        assert!(portal_diagram(&t, &here, false).contains("current"));
        Ok(())
    }

    #[test]
    fn other_sizes_get_a_list() -> Result<(), QreativeError> {
        let diagram = portal_diagram(&table(&[("110", 1.0)]), &Bitstring::new("010")?, true);
        assert!(diagram.contains("[1] -> 110  100.0%"));
        assert_eq!(diagram.lines().count(), 4);
        Ok(())
    }

    #[test]
    fn portal_lists() {
        assert_eq!(portal_list(5), "1, 2, 3, 4 or 5");
        assert_eq!(portal_list(2), "1 or 2");
        assert_eq!(portal_list(1), "1");
    }
}
