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

//! Shared layout documents for the core tests

use crate::core::{Document, LayoutParser, ParseOptions};

/// A window holding a box with a button and a three-line label
pub const WINDOW_GLADE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- Generated with glade 3.22.1 -->
<interface>
  <requires lib="gtk+" version="3.20"/>
  <object class="GtkAdjustment" id="adjustment1">
    <property name="upper">100</property>
    <property name="step_increment">1</property>
  </object>
  <object class="GtkWindow" id="MainWindow">
    <property name="can_focus">False</property>
    <property name="title" translatable="yes">Demo</property>
    <signal name="destroy" handler="on_destroy" swapped="no"/>
    <child>
      <object class="GtkBox" id="box1">
        <property name="visible">True</property>
        <child>
          <object class="GtkButton" id="okButton">
            <property name="label" translatable="yes">OK</property>
            <property name="visible">True</property>
            <signal name="clicked" handler="on_ok_clicked" swapped="yes"/>
          </object>
          <packing>
            <property name="expand">False</property>
            <property name="position">0</property>
          </packing>
        </child>
        <child>
          <object class="GtkLabel" id="InfoLabel">
            <property name="visible">True</property>
            <property name="label" translatable="yes">first line
second line
third line</property>
          </object>
          <packing>
            <property name="position">1</property>
          </packing>
        </child>
      </object>
    </child>
  </object>
</interface>
"#;

/// Parses with the given options, panicking on error
pub fn parse_with(content: &str, options: ParseOptions) -> Document {
    LayoutParser::new(options)
        .parse_str(content, "test.glade")
        .expect("fixture should parse")
}

/// Parses with default options
pub fn parse(content: &str) -> Document {
    parse_with(content, ParseOptions::default())
}

/// Wraps object declarations in a minimal valid document
pub fn layout(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<interface>\n  <requires lib=\"gtk+\" version=\"3.20\"/>\n{}\n</interface>\n",
        body
    )
}
