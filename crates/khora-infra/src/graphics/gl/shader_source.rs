// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Splits a single combined shader file into [`ShaderSources`] (§6).

use khora_core::error::{EngineError, EngineResult};
use khora_core::renderer::api::ShaderSources;

const DIRECTIVE: &str = "#type";

/// Parses a shader file laid out as one or more `#type vertex` / `#type
/// fragment` sections, each running until the next `#type` line or EOF.
///
/// Each section is padded with leading blank lines so a GLSL compile error
/// (always reported relative to the text actually handed to the driver)
/// lands on the line it occupies in `text`, not on a line relative to its
/// own section.
pub fn shader_source(text: &str) -> EngineResult<ShaderSources> {
    let lines: Vec<&str> = text.lines().collect();
    let mut vertex: Option<String> = None;
    let mut fragment: Option<String> = None;

    let mut i = 0;
    while i < lines.len() {
        let Some(stage) = lines[i].trim_start().strip_prefix(DIRECTIVE) else {
            i += 1;
            continue;
        };
        let stage = stage.trim();
        if stage != "vertex" && stage != "fragment" {
            return Err(EngineError::ShaderCreationFailed {
                source: "shader_source".to_string(),
                reason: format!("unknown shader stage '{stage}'"),
                line: Some((i + 1) as u32),
            });
        }

        let body_start = i + 1;
        let mut end = body_start;
        while end < lines.len() && !lines[end].trim_start().starts_with(DIRECTIVE) {
            end += 1;
        }

        let mut section = "\n".repeat(body_start);
        section.push_str(&lines[body_start..end].join("\n"));
        match stage {
            "vertex" => vertex = Some(section),
            "fragment" => fragment = Some(section),
            _ => unreachable!(),
        }
        i = end;
    }

    let vertex = vertex.ok_or_else(|| EngineError::ShaderCreationFailed {
        source: "shader_source".to_string(),
        reason: "missing '#type vertex' section".to_string(),
        line: None,
    })?;
    let fragment = fragment.ok_or_else(|| EngineError::ShaderCreationFailed {
        source: "shader_source".to_string(),
        reason: "missing '#type fragment' section".to_string(),
        line: None,
    })?;

    Ok(ShaderSources { vertex, fragment })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_vertex_and_fragment_sections() {
        let source = "#type vertex\nvoid main() {}\n#type fragment\nvoid main() {}\n";
        let sources = shader_source(source).unwrap();
        assert!(sources.vertex.trim_end().ends_with("void main() {}"));
        assert!(sources.fragment.trim_end().ends_with("void main() {}"));
    }

    #[test]
    fn fragment_section_errors_report_absolute_line_number() {
        let source = "#type vertex\nvoid main() {}\n#type fragment\nline one\nline two\n";
        let sources = shader_source(source).unwrap();
        // "line two" is the file's 5th line; the padded fragment section
        // should place it at the same position.
        assert_eq!(sources.fragment.lines().nth(4), Some("line two"));
    }

    #[test]
    fn unknown_stage_is_rejected_with_its_line_number() {
        let err = shader_source("#type geometry\nfoo\n").unwrap_err();
        match err {
            EngineError::ShaderCreationFailed { line, .. } => assert_eq!(line, Some(1)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_fragment_section_fails() {
        let err = shader_source("#type vertex\nvoid main() {}\n").unwrap_err();
        assert!(matches!(err, EngineError::ShaderCreationFailed { .. }));
    }
}
