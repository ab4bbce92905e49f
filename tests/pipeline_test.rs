//! End-to-end tests of the parse → detect → analyze → build pipeline
//!
//! These drive the public library API the same way the preview UI does.

use codepeek::parser::{code_blocks, parse, CodeBlock, Segment};
use codepeek::preview::{analyze, build, Cdn, UiFramework};
use codepeek::tech::{detect, DetectedTechnologies, TechId};
use codepeek::{PreviewOutcome, PreviewSession};
use std::collections::BTreeSet;
use yare::parameterized;

fn detected(ids: &[TechId]) -> DetectedTechnologies {
    ids.iter().copied().collect()
}

#[test]
fn test_plain_javascript_answer() {
    let segments = parse("Here is code:\n```js\nconsole.log(1)\n```\nDone");

    assert_eq!(
        segments,
        vec![
            Segment::text("Here is code:"),
            Segment::code("js", "console.log(1)\n"),
            Segment::text("Done"),
        ]
    );

    let technologies = detect(code_blocks(&segments));
    assert!(technologies.is_empty());

    let capability = analyze(&technologies);
    assert!(capability.can_preview);
    assert_eq!(capability.framework, UiFramework::None);
}

#[test]
fn test_css_framework_answer() {
    let answer = "Tailwind version:\n\
                  ```html\n<div class=\"flex p-4\">Hi</div>\n```\n\
                  Bootstrap version:\n\
                  ```html\n<button class=\"btn btn-primary\">Go</button>\n```";
    let segments = parse(answer);
    let technologies = detect(code_blocks(&segments));
    assert_eq!(technologies, detected(&[TechId::Tailwind, TechId::Bootstrap]));

    let capability = analyze(&technologies);
    assert!(capability.can_preview);
    assert_eq!(
        capability.cdns,
        BTreeSet::from([Cdn::Tailwind, Cdn::Bootstrap])
    );
}

#[test]
fn test_python_answer_is_blocked() {
    let segments = parse("```python\nimport os\n```");
    let technologies = detect(code_blocks(&segments));
    assert_eq!(technologies, detected(&[TechId::Python]));

    let capability = analyze(&technologies);
    assert!(!capability.can_preview);
    assert!(capability
        .warnings
        .iter()
        .any(|w| w.contains("Python") && w.contains("cannot be previewed")));
    assert!(capability
        .suggestions
        .iter()
        .any(|s| s.contains("server environment")));
}

#[test]
fn test_text_without_code() {
    assert_eq!(parse("  no code here \n"), vec![Segment::text("no code here")]);
}

#[test]
fn test_unterminated_fence_stays_text() {
    let segments = parse("Start\n```js\nlet x = 1;");
    assert_eq!(segments, vec![Segment::text("Start\n```js\nlet x = 1;")]);
}

#[test]
fn test_code_segments_keep_order() {
    let answer = "a\n```html\n<p>1</p>\n```\n```\nplain\n```\nb\n```py\nx = 1\n```";
    let segments = parse(answer);
    let languages: Vec<&str> = code_blocks(&segments)
        .map(|b| b.language.as_str())
        .collect();
    assert_eq!(languages, vec!["html", "plaintext", "py"]);
    assert!(segments.iter().all(|s| match s {
        Segment::Text { content } => !content.trim().is_empty(),
        Segment::Code(_) => true,
    }));
}

#[test]
fn test_detect_is_order_independent() {
    let blocks = vec![
        CodeBlock::new("jsx", "const App = () => <div className=\"x\" />;"),
        CodeBlock::new("sql", "SELECT * FROM users"),
        CodeBlock::new("html", "<div class=\"card\">x</div>"),
    ];
    let forward = detect(&blocks);
    let backward = detect(blocks.iter().rev());
    assert_eq!(forward, backward);
    assert_eq!(forward, detect(&blocks));
}

#[parameterized(
    empty = { &[], true },
    only_python = { &[TechId::Python], false },
    backend_pair = { &[TechId::Python, TechId::Sql], false },
    mixed = { &[TechId::Python, TechId::Html], true },
    only_react = { &[TechId::React], true },
    angular = { &[TechId::Angular], false },
)]
fn test_can_preview_rule(ids: &[TechId], expected: bool) {
    assert_eq!(analyze(&detected(ids)).can_preview, expected);
}

#[test]
fn test_vue_wins_over_react() {
    let capability = analyze(&detected(&[TechId::React, TechId::Vue]));
    assert_eq!(capability.framework, UiFramework::Vue);
}

#[test]
fn test_plain_document_structure() {
    let code = "<p>Hello</p>";
    let light = build(code, UiFramework::None, &BTreeSet::new(), false);
    assert_eq!(light.matches("<head>").count(), 1);
    assert_eq!(light.matches("<body>").count(), 1);
    assert!(!light.contains("#1a1a2e"));

    let dark = build(code, UiFramework::None, &BTreeSet::new(), true);
    assert_eq!(dark.matches("background-color: #1a1a2e").count(), 1);
}

#[test]
fn test_build_is_deterministic() {
    let cdns = BTreeSet::from([Cdn::Bootstrap]);
    let code = "export default function App() { return <p/>; }";
    assert_eq!(
        build(code, UiFramework::React, &cdns, true),
        build(code, UiFramework::React, &cdns, true)
    );
}

#[test]
fn test_session_preview_of_react_answer() {
    let answer = "Component:\n```jsx\nimport React from 'react';\n\
                  export default function App() {\n  return <h1 className=\"title\">Hi</h1>;\n}\n```";
    let mut session = PreviewSession::default();
    let request = session.begin_request();
    let analysis = session.complete_request(request, answer).unwrap();
    assert!(analysis.previewable);
    assert!(analysis.technologies.contains(TechId::React));

    match session.preview(false).unwrap() {
        PreviewOutcome::Ready {
            document, label, ..
        } => {
            assert!(document.contains("type=\"text/babel\""));
            assert!(document.contains("<div id=\"root\"></div>"));
            assert!(!document.contains("import React"));
            assert_eq!(label, "React");
        }
        other => panic!("Expected a ready preview, got {:?}", other),
    }
}

#[test]
fn test_session_blocks_backend_answer() {
    let mut session = PreviewSession::default();
    let request = session.begin_request();
    session
        .complete_request(request, "```cs\nusing System;\n```")
        .unwrap();

    match session.preview(false).unwrap() {
        PreviewOutcome::Blocked { warnings, .. } => {
            assert_eq!(warnings, vec!["C# code cannot be previewed in the browser."]);
        }
        other => panic!("Expected a blocked preview, got {:?}", other),
    }
    assert!(session.current_document().is_none());
}

#[test]
fn test_untagged_commands_are_not_previewed() {
    let mut session = PreviewSession::default();
    let request = session.begin_request();
    let analysis = session
        .complete_request(request, "Steps:\n```\nnpm install\nnpm start\n```")
        .unwrap();
    assert!(!analysis.previewable);

    assert_eq!(
        session.preview(false).unwrap_err(),
        codepeek::SessionError::NothingToPreview
    );
}
