use std::fmt::{Display, Write};

use crate::node::Node;

/// Render the subtree rooted at `root` as a Graphviz digraph, labelling each
/// node with its interval, priority and subtree max.
pub(crate) fn print_dot<R>(root: Option<&Node<R>>) -> String
where
    R: Display,
{
    let mut buf = String::new();

    // Writing to a String never fails.
    let _ = writeln!(buf, "digraph {{");
    let _ = writeln!(buf, r#"bgcolor = "transparent";"#);
    let _ = writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    );
    if let Some(root) = root {
        let _ = recurse(root, &mut buf);
    }
    let _ = writeln!(buf, "}}");

    buf
}

fn recurse<R, W>(n: &Node<R>, buf: &mut W) -> std::fmt::Result
where
    W: Write,
    R: Display,
{
    writeln!(
        buf,
        r#""{}" [label="{} | {{ max={} | p={} }}"];"#,
        n.interval(),
        n.interval(),
        n.subtree_max(),
        n.priority(),
    )?;

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    n.interval(),
                    v.interval()
                )?;
                recurse(v, buf)?;
            }
            None => {
                writeln!(buf, "\"null_{}\" [shape=point,style=invis];", n.interval())?;
                writeln!(
                    buf,
                    "\"{}\" -> \"null_{}\" [style=invis];",
                    n.interval(),
                    n.interval()
                )?;
            }
        };
    }

    Ok(())
}
