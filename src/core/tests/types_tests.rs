// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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

use crate::core::{Diagnostic, DiagnosticKind, GladeObject, Property, Requirement};

#[test]
fn test_object_display() {
    let object = GladeObject::new("GtkButton", "okButton", 3);
    assert_eq!(format!("{}", object), "GtkButton#okButton");

    // No identifier, class only
    let anonymous = GladeObject::new("GtkTreeSelection", "", 0);
    assert_eq!(format!("{}", anonymous), "GtkTreeSelection");
}

#[test]
fn test_property_lookup_returns_first_match() {
    let mut object = GladeObject::new("GtkLabel", "Label", 0);
    object.properties = vec![
        Property {
            name: "label".to_string(),
            value: "first".to_string(),
            ..Property::default()
        },
        Property {
            name: "label".to_string(),
            value: "second".to_string(),
            ..Property::default()
        },
    ];

    assert_eq!(object.property("label"), Some("first"));
    assert_eq!(object.property("visible"), None);
}

#[test]
fn test_diagnostic_is_one_based() {
    let diagnostic = Diagnostic::new(
        0,
        DiagnosticKind::MalformedSignal,
        "signal needs a handler".to_string(),
    );

    assert_eq!(diagnostic.line, 1);
    assert_eq!(format!("{}", diagnostic), "[signal] line 1: signal needs a handler");
}

#[test]
fn test_requirement_display() {
    let requirement = Requirement {
        lib: "gtk+".to_string(),
        version: "3.20".to_string(),
    };
    assert_eq!(requirement.to_string(), "gtk+ 3.20");
}

#[test]
fn test_document_serializes_without_scanner_state() {
    let document = super::fixtures::parse(super::fixtures::WINDOW_GLADE);
    let json = serde_json::to_value(&document).unwrap();

    assert_eq!(json["objects_count"], 5);
    assert_eq!(json["requires"]["lib"], "gtk+");
    assert!(json.get("diagnostics").is_none());
    assert!(json.get("source").is_none());
    assert!(json["objects"][0]["properties"][0].get("span").is_none());
}
