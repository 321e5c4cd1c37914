//! Streaming JSON5 parsing for content files
//!
//! Supports both single-line JSONL and multi-line JSON5 formats.
//! JSON5 adds support for comments, trailing commas, and unquoted keys.
//!
//! Each object carries a `type` of `sprite` or `scene`. Parsed objects are
//! loaded into a [`SpriteCatalog`] and [`SceneRegistry`] with [`load_into`].

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::SpriteCatalog;
use crate::color::parse_color;
use crate::models::Warning;
use crate::scene::{SceneConfig, SceneRegistry};
use crate::sprite::Sprite;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

/// A sprite declared in content.
///
/// Either `grid` (rows of color strings) or `palette` + `rows`
/// (one character per pixel) must be given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpriteDef {
    pub name: String,
    #[serde(default)]
    pub grid: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub palette: Option<HashMap<String, String>>,
    #[serde(default)]
    pub rows: Option<Vec<String>>,
}

/// A scene declared in content.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneDef {
    pub id: String,
    #[serde(flatten)]
    pub config: SceneConfig,
}

/// One object of a content stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentObject {
    Sprite(SpriteDef),
    Scene(SceneDef),
}

/// A problem found while reading a stream, with the line the object started on.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    pub message: String,
    pub line: usize,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Result of parsing a JSON stream.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub objects: Vec<ContentObject>,
    pub warnings: Vec<ParseWarning>,
}

/// Parse a single JSON5 string into a content object.
pub fn parse_line(line: &str, line_number: usize) -> Result<ContentObject, ParseError> {
    json5::from_str(line).map_err(|e| ParseError { message: e.to_string(), line: line_number })
}

/// Parse a stream of JSON5 objects.
///
/// Objects may span lines; an object ends when its braces and brackets
/// balance. A malformed object is reported as a warning and ends the stream,
/// since the next object boundary cannot be found reliably.
pub fn parse_stream<R: Read>(reader: R) -> ParseResult {
    use std::io::BufRead;

    let mut result = ParseResult::default();
    let mut lines = std::io::BufReader::new(reader).lines();

    let mut accumulator = String::new();
    let mut start_line = 1;
    let mut current_line = 1;
    let mut depth: i32 = 0;
    // Quote character of the string literal being scanned
    let mut quote: Option<char> = None;
    let mut escape_next = false;

    while let Some(Ok(line)) = lines.next() {
        let trimmed = line.trim();
        if accumulator.is_empty() && (trimmed.is_empty() || trimmed.starts_with("//")) {
            current_line += 1;
            start_line = current_line;
            continue;
        }
        if accumulator.is_empty() {
            start_line = current_line;
        } else {
            accumulator.push('\n');
        }
        accumulator.push_str(&line);

        for ch in line.chars() {
            if escape_next {
                escape_next = false;
                continue;
            }
            match (quote, ch) {
                (Some(_), '\\') => escape_next = true,
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(ch),
                (None, '{' | '[') => depth += 1,
                (None, '}' | ']') => depth -= 1,
                (None, _) => {}
            }
        }

        if depth == 0 && !accumulator.trim().is_empty() {
            match parse_line(&accumulator, start_line) {
                Ok(obj) => result.objects.push(obj),
                Err(e) => {
                    result.warnings.push(ParseWarning { message: e.message, line: e.line });
                    return result;
                }
            }
            accumulator.clear();
            quote = None;
            escape_next = false;
        }

        current_line += 1;
    }

    if !accumulator.trim().is_empty() {
        if let Err(e) = parse_line(&accumulator, start_line).map(|obj| result.objects.push(obj)) {
            result.warnings.push(ParseWarning { message: e.message, line: e.line });
        }
    }

    result
}

/// Parse a content file from disk.
pub fn parse_file(path: &Path) -> std::io::Result<ParseResult> {
    let file = std::fs::File::open(path)?;
    Ok(parse_stream(file))
}

impl SpriteDef {
    /// Build the sprite. Bad colors and tokens become magenta with a warning.
    pub fn to_sprite(&self) -> (Sprite, Vec<Warning>) {
        let mut warnings = Vec::new();
        let sprite = match (&self.grid, &self.rows) {
            (Some(grid), _) => {
                let (sprite, w) = Sprite::parse(grid);
                warnings.extend(w);
                sprite
            }
            (None, Some(rows)) => {
                let mut palette = HashMap::new();
                for (key, value) in self.palette.iter().flatten() {
                    let mut chars = key.chars();
                    let (Some(token), None) = (chars.next(), chars.next()) else {
                        warnings.push(Warning::new(format!("Palette key '{}' must be a single character", key)));
                        continue;
                    };
                    match parse_color(value) {
                        Ok(color) => {
                            palette.insert(token, color);
                        }
                        Err(e) => {
                            warnings.push(Warning::new(format!("Invalid color '{}' for '{}': {}", value, key, e)))
                        }
                    }
                }
                let (sprite, w) = Sprite::from_tokens(&palette, rows);
                warnings.extend(w);
                sprite
            }
            (None, None) => {
                warnings.push(Warning::new("Sprite has neither 'grid' nor 'rows'"));
                Sprite::default()
            }
        };
        let warnings = warnings
            .into_iter()
            .map(|w| Warning::new(format!("Sprite '{}': {}", self.name, w.message)))
            .collect();
        (sprite, warnings)
    }
}

/// Register every parsed object. Later objects replace earlier ones with the same id.
///
/// Returns the warnings produced while building sprites and scenes.
pub fn load_into(objects: Vec<ContentObject>, catalog: &mut SpriteCatalog, scenes: &mut SceneRegistry) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for object in objects {
        match object {
            ContentObject::Sprite(def) => {
                let (sprite, w) = def.to_sprite();
                warnings.extend(w);
                catalog.register(def.name, sprite);
            }
            ContentObject::Scene(def) => {
                let (scene, w) = crate::scene::Scene::from_config(def.id, def.config);
                warnings.extend(w);
                scenes.insert(scene);
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{MAGENTA, RED, TRANSPARENT};
    use crate::models::{Action, Verb};
    use crate::registry::Registry;
    use std::io::Cursor;

    #[test]
    fn test_parse_line_sprite() {
        let line = r##"{"type": "sprite", "name": "dot", "grid": [["#F00"]]}"##;
        match parse_line(line, 1).unwrap() {
            ContentObject::Sprite(s) => {
                assert_eq!(s.name, "dot");
                assert_eq!(s.grid, Some(vec![vec!["#F00".to_string()]]));
            }
            other => panic!("Expected sprite, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_line_scene_flattens_config() {
        let line = r#"{"type": "scene", "id": "bar", "description": "Smoky.", "exits": {"street": {"x": 50, "y": 200}}}"#;
        match parse_line(line, 1).unwrap() {
            ContentObject::Scene(s) => {
                assert_eq!(s.id, "bar");
                assert_eq!(s.config.description, "Smoky.");
                assert_eq!(s.config.exits.len(), 1);
            }
            other => panic!("Expected scene, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_line_invalid_json() {
        let err = parse_line("{not valid json}", 5).unwrap_err();
        assert_eq!(err.line, 5);
    }

    #[test]
    fn test_parse_line_unknown_type() {
        assert!(parse_line(r#"{"type": "palette", "name": "x"}"#, 1).is_err());
        assert!(parse_line(r#"{"name": "x"}"#, 1).is_err());
    }

    #[test]
    fn test_parse_stream_jsonl_with_blank_lines() {
        let input = r##"{"type": "sprite", "name": "a", "grid": [["#F00"]]}

{"type": "scene", "id": "bar"}
"##;
        let result = parse_stream(Cursor::new(input));
        assert_eq!(result.objects.len(), 2);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_parse_stream_multiline_json5() {
        let input = r##"// the bar
{
  type: "scene",
  id: "bar",
  hotspots: [
    {name: "door", x: 50, y: 150, width: 80, height: 150,
     actions: {use: "exit-to-street", look: "A door with a \"brass\" knob {old}."}},
  ],
}
{type: "sprite", name: "sign", palette: {r: "#F00"}, rows: ["r."]}
"##;
        let result = parse_stream(Cursor::new(input));
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.objects.len(), 2);
        match &result.objects[0] {
            ContentObject::Scene(s) => {
                let door = &s.config.hotspots[0];
                assert_eq!(door.actions.get(&Verb::Use), Some(&Action::transition("street")));
            }
            other => panic!("Expected scene, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_stream_single_quoted_strings_hide_braces() {
        let input = r#"{
  type: 'scene',
  id: 'attic',
  hotspots: [
    {name: 'chest', x: 0, y: 0, width: 10, height: 10,
     actions: {look: 'Carved "}" marks and a { scratch.', talk: "It's silent."}},
  ],
}
{type: 'scene', id: 'cellar'}
"#;
        let result = parse_stream(Cursor::new(input));
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.objects.len(), 2);
        match &result.objects[0] {
            ContentObject::Scene(s) => {
                let chest = &s.config.hotspots[0];
                assert_eq!(chest.actions.get(&Verb::Look), Some(&Action::text(r#"Carved "}" marks and a { scratch."#)));
                assert_eq!(chest.actions.get(&Verb::Talk), Some(&Action::text("It's silent.")));
            }
            other => panic!("Expected scene, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_verb_is_a_warning_not_a_stop() {
        let input = r#"{"type": "scene", "id": "a", "hotspots": [{"name": "box", "x": 0, "y": 0, "width": 5, "height": 5, "actions": {"open": "Creak.", "look": "A box."}}]}
{"type": "scene", "id": "b"}
"#;
        let result = parse_stream(Cursor::new(input));
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.objects.len(), 2);

        let mut catalog = SpriteCatalog::new();
        let mut scenes = SceneRegistry::new();
        let warnings = load_into(result.objects, &mut catalog, &mut scenes);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("unknown verb 'open'"), "{}", warnings[0]);

        let hotspot = &scenes.get_scene("a").unwrap().hotspots[0];
        assert_eq!(hotspot.actions.len(), 1);
        assert_eq!(hotspot.actions.get(&Verb::Look), Some(&Action::text("A box.")));
        assert!(scenes.get_scene("b").is_some());
    }

    #[test]
    fn test_parse_stream_stops_at_malformed_object() {
        let input = r#"{"type": "scene", "id": "a"}
{"type": "scene", "id": }
{"type": "scene", "id": "c"}
"#;
        let result = parse_stream(Cursor::new(input));
        assert_eq!(result.objects.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].line, 2);
    }

    #[test]
    fn test_parse_stream_reports_start_line_of_multiline_object() {
        let input = "{\"type\": \"scene\", \"id\": \"a\"}\n\n{\n  \"type\": \"nope\"\n}\n";
        let result = parse_stream(Cursor::new(input));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].line, 3);
    }

    #[test]
    fn test_sprite_def_from_rows() {
        let def = SpriteDef {
            name: "sign".into(),
            grid: None,
            palette: Some([("r".to_string(), "#FF0000".to_string())].into_iter().collect()),
            rows: Some(vec!["r.".into(), " r".into()]),
        };
        let (sprite, warnings) = def.to_sprite();
        assert!(warnings.is_empty());
        assert_eq!(sprite.pixel_at(0, 0), Some(RED));
        assert_eq!(sprite.pixel_at(1, 0), Some(TRANSPARENT));
        assert_eq!(sprite.pixel_at(0, 1), Some(TRANSPARENT));
    }

    #[test]
    fn test_sprite_def_bad_palette() {
        let def = SpriteDef {
            name: "sign".into(),
            grid: None,
            palette: Some([("rr".to_string(), "#FF0000".to_string())].into_iter().collect()),
            rows: Some(vec!["r".into()]),
        };
        let (sprite, warnings) = def.to_sprite();
        assert_eq!(sprite.pixel_at(0, 0), Some(MAGENTA));
        assert!(warnings.iter().all(|w| w.message.starts_with("Sprite 'sign'")));
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_sprite_def_without_pixels() {
        let def = SpriteDef { name: "ghost".into(), grid: None, palette: None, rows: None };
        let (sprite, warnings) = def.to_sprite();
        assert!(sprite.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_load_into() {
        let input = r##"{"type": "sprite", "name": "table", "grid": [["#F00"]]}
{"type": "scene", "id": "bar", "wall_color": "nonsense"}"##;
        let result = parse_stream(Cursor::new(input));
        let mut catalog = SpriteCatalog::new();
        let mut scenes = SceneRegistry::new();
        let warnings = load_into(result.objects, &mut catalog, &mut scenes);
        assert_eq!(warnings.len(), 1);
        assert_eq!(catalog.get("table").map(Sprite::width), Some(1));
        assert!(scenes.contains("bar"));
    }
}
