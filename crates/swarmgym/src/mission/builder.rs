//! Mission template resolution and the working-mission builder.

use super::MissionDoc;
use crate::{Result, SwarmError};
use std::path::{Path, PathBuf};

/// Default working path the builder writes and environments read
pub const WORKING_MISSION_FILE: &str = ".orbit_working.xml";

/// Environment variable listing extra mission template directories
pub const MISSION_PATH_VAR: &str = "SWARMGYM_MISSION_PATH";

/// Resolve a mission template name to a path.
///
/// Checks the name as a path, then each directory in `SWARMGYM_MISSION_PATH`,
/// then the local `missions/` directory.
pub fn find_mission(name: &str) -> Result<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }

    if let Ok(paths) = std::env::var(MISSION_PATH_VAR) {
        for dir in std::env::split_paths(&paths) {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    let local = Path::new("missions").join(name);
    if local.is_file() {
        return Ok(local);
    }

    Err(SwarmError::Mission(format!(
        "mission template not found: {}",
        name
    )))
}

/// Builds a working mission from a template.
///
/// Sets the shared autonomy attributes and appends deep copies of the first
/// `<entity>` node until the requested actor count is reached.
#[derive(Clone, Copy, Debug)]
pub struct MissionBuilder {
    pub x_discrete: bool,
    pub y_discrete: bool,
    pub ctrl_y: bool,
    pub num_actors: usize,
}

impl Default for MissionBuilder {
    fn default() -> Self {
        Self {
            x_discrete: true,
            y_discrete: true,
            ctrl_y: false,
            num_actors: 1,
        }
    }
}

impl MissionBuilder {
    /// Apply the builder to a parsed template
    pub fn apply(&self, doc: &mut MissionDoc) -> Result<()> {
        let autonomy = doc
            .root
            .child_mut("entity_common")
            .and_then(|c| c.child_mut("autonomy"))
            .ok_or_else(|| SwarmError::Mission("template missing entity_common/autonomy".into()))?;

        autonomy.set_attr("x_discrete", bool_attr(self.x_discrete));
        autonomy.set_attr("y_discrete", bool_attr(self.y_discrete));
        autonomy.set_attr("ctrl_y", bool_attr(self.ctrl_y));

        if self.num_actors > 1 {
            let first = doc
                .root
                .child("entity")
                .cloned()
                .ok_or_else(|| SwarmError::Mission("template has no entity node".into()))?;
            for _ in doc.entity_count()..self.num_actors {
                doc.root.children.push(first.clone());
            }
        }
        Ok(())
    }

    /// Load a template, apply the flags, and write the working mission
    pub fn write(&self, template: &Path, out: &Path) -> Result<MissionDoc> {
        let mut doc = MissionDoc::parse_file(template)?;
        self.apply(&mut doc)?;
        doc.write_file(out)?;
        tracing::debug!(
            out = %out.display(),
            num_actors = self.num_actors as u64,
            "working mission written"
        );
        Ok(doc)
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"
<mission>
  <run start="0" end="200" dt="1"/>
  <entity_common>
    <autonomy x_discrete="true" y_discrete="true" ctrl_y="false" radius="2"/>
  </entity_common>
  <entity team_id="1">
    <state x="0" y="0"/>
  </entity>
</mission>"#;

    #[test]
    fn test_builder_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("template.xml");
        std::fs::write(&template, TEMPLATE).unwrap();
        let out = dir.path().join("working.xml");

        let builder = MissionBuilder {
            x_discrete: false,
            y_discrete: false,
            ctrl_y: true,
            num_actors: 2,
        };
        builder.write(&template, &out).unwrap();

        let doc = MissionDoc::parse_file(&out).unwrap();
        let flags = doc.common_autonomy().unwrap();
        assert!(!flags.x_discrete);
        assert!(!flags.y_discrete);
        assert!(flags.ctrl_y);
        assert_eq!(doc.entity_count(), 2);
    }

    #[test]
    fn test_duplicated_entity_is_deep_copy() {
        let mut doc = MissionDoc::parse_str(TEMPLATE).unwrap();
        MissionBuilder {
            num_actors: 2,
            ..Default::default()
        }
        .apply(&mut doc)
        .unwrap();

        let entities: Vec<_> = doc.root.children_named("entity").collect();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0], entities[1]);
        assert!(entities[1].child("state").is_some());
    }

    #[test]
    fn test_find_mission_direct_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.xml");
        std::fs::write(&path, TEMPLATE).unwrap();
        let found = find_mission(path.to_str().unwrap()).unwrap();
        assert_eq!(found, path);
    }

    #[test]
    fn test_find_mission_unknown() {
        assert!(find_mission("no-such-mission.xml").is_err());
    }
}
