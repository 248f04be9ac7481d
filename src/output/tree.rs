//! Text renderer in the layout of the classic `tree` command

use std::io::Write;

use log::debug;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::error::Result;
use crate::tree::{Filter, NodeId, Tree, TreeConfig, format_mod_time, format_size};

use super::utils::{VisibleChild, continuation_prefix, visible_children};

/// Directories and files printed, the root not included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub dirs: usize,
    pub files: usize,
}

impl Counts {
    /// Summary line, starting with a blank line as `tree` prints it.
    pub fn footer(&self, dirs_only: bool) -> String {
        let mut footer = format!("\n{} directories", self.dirs);
        if !dirs_only {
            footer.push_str(&format!(", {} files", self.files));
        }
        footer
    }
}

/// Writes the filtered, sorted tree one line per node.
pub struct TreeRenderer<'a> {
    config: &'a TreeConfig,
    filter: &'a Filter,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(config: &'a TreeConfig, filter: &'a Filter) -> Self {
        Self { config, filter }
    }

    /// Render every visible node and return the counts for the footer.
    /// A failed write aborts the walk; lines already written stay written.
    pub fn render<W: WriteColor>(&self, tree: &Tree, out: &mut W) -> Result<Counts> {
        let mut counts = Counts::default();

        self.write_name(out, tree, Tree::ROOT, "")?;
        writeln!(out)?;
        self.render_children(tree, Tree::ROOT, "", 0, "", out, &mut counts)?;

        debug!(
            "rendered {} directories, {} files",
            counts.dirs, counts.files
        );
        Ok(counts)
    }

    /// Write the footer for `counts` followed by a newline.
    pub fn finish<W: WriteColor>(&self, counts: Counts, out: &mut W) -> Result<()> {
        writeln!(out, "{}", counts.footer(self.config.dirs_only))?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn render_children<W: WriteColor>(
        &self,
        tree: &Tree,
        dir: NodeId,
        dir_path: &str,
        depth: usize,
        prefix: &str,
        out: &mut W,
        counts: &mut Counts,
    ) -> Result<()> {
        let children = visible_children(tree, dir, dir_path, depth, self.filter, self.config);

        for child in children {
            let is_dir = tree.node(child.id).is_dir();
            if is_dir {
                counts.dirs += 1;
            } else {
                counts.files += 1;
            }

            self.write_entry(tree, &child, prefix, out)?;

            if is_dir {
                let child_prefix = continuation_prefix(prefix, child.is_last);
                self.render_children(
                    tree,
                    child.id,
                    &child.path,
                    depth + 1,
                    &child_prefix,
                    out,
                    counts,
                )?;
            }
        }
        Ok(())
    }

    fn write_entry<W: WriteColor>(
        &self,
        tree: &Tree,
        child: &VisibleChild,
        prefix: &str,
        out: &mut W,
    ) -> Result<()> {
        if !self.config.no_indent {
            let connector = if child.is_last { "└── " } else { "├── " };
            write!(out, "{}{}", prefix, connector)?;
        }

        if self.config.has_annotations() {
            let props = self.annotations(tree, child.id);
            if self.config.colorize {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            }
            write!(out, "[{}]", props)?;
            out.reset()?;
            write!(out, "  ")?;
        }

        self.write_name(out, tree, child.id, &child.path)?;
        writeln!(out)?;
        Ok(())
    }

    /// Size and timestamp block contents, without the brackets.
    fn annotations(&self, tree: &Tree, id: NodeId) -> String {
        let node = tree.node(id);
        let mut props = Vec::new();

        if self.config.byte_size || self.config.human_size {
            let size = if node.is_dir() {
                if self.config.dir_sizes { tree.total_size(id) } else { 0 }
            } else {
                node.size.unwrap_or(0)
            };
            if self.config.human_size {
                props.push(format!("{:>4}", format_size(size)));
            } else {
                props.push(format!("{:>11}", size));
            }
        }
        if self.config.show_mod_time {
            props.push(format_mod_time(node.modified));
        }

        props.join(" ")
    }

    fn write_name<W: WriteColor>(
        &self,
        out: &mut W,
        tree: &Tree,
        id: NodeId,
        path: &str,
    ) -> Result<()> {
        let node = tree.node(id);
        let label = if self.config.full_path && !path.is_empty() {
            tree.path_of(id)
        } else {
            node.name.clone()
        };
        let label = if self.config.quote_names {
            format!("\"{}\"", label)
        } else {
            label
        };

        if self.config.colorize && node.is_dir() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
            write!(out, "{}", label)?;
            out.reset()?;
        } else {
            write!(out, "{}", label)?;
        }
        Ok(())
    }
}
