//! Mission-configuration documents.
//!
//! A mission is an XML document: a `<mission>` root holding a
//! `<entity_common>` node (with nested `<autonomy>` parameters shared by all
//! entities) and one `<entity>` node per simulated vehicle. Entity-level
//! autonomy attributes override the common ones.

mod builder;

pub use builder::{find_mission, MissionBuilder, WORKING_MISSION_FILE};

use crate::{Result, SwarmError};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::path::Path;

/// One node of the mission tree: a name, ordered attributes, child nodes
#[derive(Clone, Debug, PartialEq)]
pub struct MissionNode {
    pub name: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<MissionNode>,
}

impl MissionNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attribute value by key
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Iterate attributes in document order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&MissionNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First child with the given name, mutable
    pub fn child_mut(&mut self, name: &str) -> Option<&mut MissionNode> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// All children with the given name, in document order
    pub fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a MissionNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Autonomy parameters for one entity, after entity_common merge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutonomyFlags {
    /// Discretize the x command axis
    pub x_discrete: bool,
    /// Discretize the y command axis
    pub y_discrete: bool,
    /// Drive the y axis at all
    pub ctrl_y: bool,
    /// Station-keeping band radius
    pub radius: f64,
}

/// A parsed mission document
#[derive(Clone, Debug)]
pub struct MissionDoc {
    pub root: MissionNode,
}

impl MissionDoc {
    /// Parse a mission from XML text
    pub fn parse_str(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut stack: Vec<MissionNode> = Vec::new();
        let mut root: Option<MissionNode> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    stack.push(node_from_start(&e)?);
                }
                Event::Empty(e) => {
                    let node = node_from_start(&e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::End(_) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| SwarmError::Mission("unbalanced close tag".into()))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::Eof => break,
                // text, comments and declarations carry no mission data
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(SwarmError::Mission("unclosed element".into()));
        }
        let root = root.ok_or_else(|| SwarmError::Mission("empty document".into()))?;
        Ok(Self { root })
    }

    /// Parse a mission from a file
    pub fn parse_file(path: &Path) -> Result<Self> {
        let xml = std::fs::read_to_string(path).map_err(|e| {
            SwarmError::Mission(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse_str(&xml)
    }

    /// Serialize to XML text
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write_node(&mut writer, &self.root)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| SwarmError::Mission(format!("non-utf8 output: {}", e)))
    }

    /// Write the document to a file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let xml = self.to_xml_string()?;
        std::fs::write(path, xml)?;
        Ok(())
    }

    /// Number of `<entity>` nodes
    pub fn entity_count(&self) -> usize {
        self.root.children_named("entity").count()
    }

    /// Simulation timestep from the `<run>` node, 1.0 when absent
    pub fn run_timestep(&self) -> f64 {
        self.root
            .child("run")
            .and_then(|run| run.attr("dt"))
            .and_then(|dt| dt.parse().ok())
            .unwrap_or(1.0)
    }

    /// Autonomy parameters shared by all entities
    pub fn common_autonomy(&self) -> Result<AutonomyFlags> {
        let node = self.common_autonomy_node()?;
        Ok(AutonomyFlags {
            x_discrete: required_bool(node, "x_discrete")?,
            y_discrete: required_bool(node, "y_discrete")?,
            ctrl_y: required_bool(node, "ctrl_y")?,
            radius: required_f64(node, "radius")?,
        })
    }

    /// Autonomy parameters for entity `idx`, with entity-level overrides
    pub fn entity_autonomy(&self, idx: usize) -> Result<AutonomyFlags> {
        let mut flags = self.common_autonomy()?;
        let entity = self.root.children_named("entity").nth(idx).ok_or_else(|| {
            SwarmError::Mission(format!("mission has no entity at index {}", idx))
        })?;
        if let Some(overlay) = entity.child("autonomy") {
            if let Some(v) = overlay.attr("x_discrete") {
                flags.x_discrete = parse_bool(v)?;
            }
            if let Some(v) = overlay.attr("y_discrete") {
                flags.y_discrete = parse_bool(v)?;
            }
            if let Some(v) = overlay.attr("ctrl_y") {
                flags.ctrl_y = parse_bool(v)?;
            }
            if let Some(v) = overlay.attr("radius") {
                flags.radius = parse_f64(v)?;
            }
        }
        Ok(flags)
    }

    fn common_autonomy_node(&self) -> Result<&MissionNode> {
        self.root
            .child("entity_common")
            .and_then(|c| c.child("autonomy"))
            .ok_or_else(|| SwarmError::Mission("missing entity_common/autonomy node".into()))
    }
}

fn node_from_start(e: &BytesStart<'_>) -> Result<MissionNode> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut node = MissionNode::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|e| SwarmError::Mission(format!("bad attribute: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        node.set_attr(key, value);
    }
    Ok(node)
}

fn attach(
    stack: &mut Vec<MissionNode>,
    root: &mut Option<MissionNode>,
    node: MissionNode,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(SwarmError::Mission("multiple root elements".into())),
    }
    Ok(())
}

fn write_node<W: std::io::Write>(writer: &mut Writer<W>, node: &MissionNode) -> Result<()> {
    let mut start = BytesStart::new(node.name.as_str());
    for (k, v) in node.attrs() {
        start.push_attribute((k, v));
    }
    if node.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| SwarmError::Mission(e.to_string()))?;
    } else {
        writer
            .write_event(Event::Start(start))
            .map_err(|e| SwarmError::Mission(e.to_string()))?;
        for child in &node.children {
            write_node(writer, child)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(node.name.as_str())))
            .map_err(|e| SwarmError::Mission(e.to_string()))?;
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(SwarmError::Mission(format!("not a boolean: {:?}", other))),
    }
}

fn parse_f64(value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| SwarmError::Mission(format!("not a number: {:?}", value)))
}

fn required_bool(node: &MissionNode, key: &str) -> Result<bool> {
    let value = node
        .attr(key)
        .ok_or_else(|| SwarmError::Mission(format!("autonomy missing attribute {:?}", key)))?;
    parse_bool(value)
}

fn required_f64(node: &MissionNode, key: &str) -> Result<f64> {
    let value = node
        .attr(key)
        .ok_or_else(|| SwarmError::Mission(format!("autonomy missing attribute {:?}", key)))?;
    parse_f64(value)
}
