use anyhow::anyhow;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use xml::reader::{EventReader, ParserConfig, XmlEvent};

use crate::maven::coordinates::MavenCoordinates;

lazy_static! {
    static ref PROPERTY_REGEX: Regex = Regex::new(r"\$\{(.+?)\}").unwrap();
}

/// Generic XML element tree: names are local names (i.e. without namespace prefix), text is the
///  trimmed concatenation of an element's own character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}
impl XmlElement {
    pub fn parse(source: &str) -> anyhow::Result<XmlElement> {
        let config = ParserConfig::new()
            .trim_whitespace(true)
            .cdata_to_characters(true)
            .ignore_comments(true);
        let reader = EventReader::new_with_config(source.as_bytes(), config);

        // open elements, innermost last
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        for event in reader {
            match event? {
                XmlEvent::StartElement { name, .. } => {
                    stack.push(XmlElement {
                        name: name.local_name,
                        text: String::new(),
                        children: Vec::new(),
                    });
                }
                XmlEvent::Characters(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text);
                    }
                }
                XmlEvent::EndElement { .. } => {
                    let finished = stack.pop().ok_or_else(|| anyhow!("unbalanced end element"))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(finished),
                        None => root = Some(finished),
                    }
                }
                _ => {}
            }
        }

        root.ok_or_else(|| anyhow!("document has no root element"))
    }

    /// first direct child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// A parsed POM. Only the parts needed for walking the dependency graph are interpreted.
///
/// NB: parent POMs are not consulted - neither for properties nor for inherited dependencies.
///  Placeholders referring to properties defined in a parent resolve to the empty string.
#[derive(Debug)]
pub struct Pom {
    project: XmlElement,
}
impl Pom {
    pub fn parse(source: &str) -> anyhow::Result<Pom> {
        let project = XmlElement::parse(source)?;
        if project.name != "project" {
            return Err(anyhow!("not a POM: root element is <{}>", project.name));
        }
        Ok(Pom { project })
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.project
            .child("properties")?
            .child(name)
            .map(|p| p.text.as_str())
    }

    /// Replaces every `${name}` with the value of the same-named property, or with the empty
    ///  string if there is no such property. Single pass: substituted values are not scanned
    ///  again.
    pub fn substitute_properties(&self, text: &str) -> String {
        PROPERTY_REGEX
            .replace_all(text, |caps: &Captures| self.property(&caps[1]).unwrap_or("").to_string())
            .into_owned()
    }

    /// The dependencies declared directly in the `<dependencies>` section, in document order.
    ///
    /// `groupId` and `artifactId` are required, `version` and `scope` are optional.
    pub fn dependencies(&self) -> anyhow::Result<Vec<MavenCoordinates>> {
        let dependencies = match self.project.child("dependencies") {
            Some(d) => d,
            None => return Ok(Vec::new()),
        };

        dependencies
            .children_named("dependency")
            .map(|d| self.dependency(d))
            .collect()
    }

    fn dependency(&self, dependency: &XmlElement) -> anyhow::Result<MavenCoordinates> {
        let required = |name: &str| {
            dependency
                .child(name)
                .map(|e| self.substitute_properties(&e.text))
                .ok_or_else(|| anyhow!("dependency without <{}>", name))
        };
        let optional = |name: &str| dependency.child(name).map(|e| self.substitute_properties(&e.text));

        let coordinates = MavenCoordinates::new(
            &required("groupId")?,
            &required("artifactId")?,
            &optional("version").unwrap_or_default(),
        );
        Ok(coordinates.with_scope(optional("scope")))
    }
}
