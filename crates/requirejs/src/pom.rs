//! Reading module metadata out of a Maven project document.

use roxmltree::{Document, Node};

use crate::error::{Error, Result};

/// Options controlling how a project document is read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PomOptions {
    /// Only dependencies whose group id contains this string are recorded.
    pub dependency_group_filter: String,

    /// Scheme prefixed to recorded dependencies (`scheme:group/artifactId`).
    pub dependency_scheme: String,
}

impl Default for PomOptions {
    fn default() -> Self {
        Self {
            dependency_group_filter: "org.webjars".to_string(),
            dependency_scheme: "pentaho-webjar-deployer".to_string(),
        }
    }
}

/// A dependency declared by the project.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// The values of a project document the descriptor needs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Pom {
    pub artifact_id: String,
    pub version: String,
    pub requirejs: String,
    pub dependencies: Vec<PomDependency>,
}

impl Pom {
    /// Parses a project document, keeping dependencies matching the group filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not XML or its root is not `project`.
    pub(crate) fn parse(xml: &str, options: &PomOptions) -> Result<Self> {
        let document = Document::parse(xml)?;
        let project = document.root_element();

        if project.tag_name().name() != "project" {
            return Err(Error::MalformedInput(format!(
                "expected a project document, found <{}>",
                project.tag_name().name()
            )));
        }

        let version = match text_at(project, &["version"]) {
            version if version.is_empty() => text_at(project, &["parent", "version"]),
            version => version,
        };

        let dependencies = child(project, "dependencies")
            .into_iter()
            .flat_map(|dependencies| elements(dependencies, "dependency"))
            .map(|dependency| PomDependency {
                group_id: text_at(dependency, &["groupId"]),
                artifact_id: text_at(dependency, &["artifactId"]),
                version: text_at(dependency, &["version"]),
            })
            .filter(|dependency| dependency.group_id.contains(&options.dependency_group_filter))
            .collect();

        Ok(Self {
            artifact_id: text_at(project, &["artifactId"]),
            version,
            requirejs: text_at(project, &["properties", "requirejs"]),
            dependencies,
        })
    }
}

fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

fn child<'a, 'input: 'a>(node: Node<'a, 'input>, name: &'a str) -> Option<Node<'a, 'input>> {
    elements(node, name).next()
}

/// Concatenated text of the element found by following `path`, or empty when absent.
fn text_at(node: Node<'_, '_>, path: &[&str]) -> String {
    let mut current = node;
    for name in path {
        match child(current, *name) {
            Some(next) => current = next,
            None => return String::new(),
        }
    }

    current
        .descendants()
        .filter(Node::is_text)
        .filter_map(|text| text.text())
        .collect::<String>()
        .trim()
        .to_string()
}
