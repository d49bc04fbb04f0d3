use ingestr_common::config::QueryCapabilities;

use super::tree::Element;

/// One step of a lookup below a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeQuery<'q> {
    /// First child with the given tag.
    Child(&'q str),
    /// First child with the given tag whose attribute `key` equals `value`.
    ChildWithAttr {
        tag: &'q str,
        key: &'q str,
        value: &'q str,
    },
}

/// Resolves [`NodeQuery`] steps against an [`Element`].
///
/// Attribute predicates are delegated to [`Element::child_with_attr`] when the
/// capabilities allow it and otherwise answered by scanning the same-tag
/// siblings here. Both walk the children in document order and return the
/// same node.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine {
    capabilities: QueryCapabilities,
}

impl QueryEngine {
    pub fn new(capabilities: QueryCapabilities) -> Self {
        Self { capabilities }
    }

    pub fn find<'e>(&self, node: &'e Element, query: &NodeQuery<'_>) -> Option<&'e Element> {
        match *query {
            NodeQuery::Child(tag) => node.child(tag),
            NodeQuery::ChildWithAttr { tag, key, value } => {
                if self.capabilities.attribute_predicates {
                    node.child_with_attr(tag, key, value)
                } else {
                    scan_siblings(node, tag, key, value)
                }
            }
        }
    }

    /// Follows `path` one step at a time, stopping at the first miss.
    pub fn find_path<'e>(&self, node: &'e Element, path: &[NodeQuery<'_>]) -> Option<&'e Element> {
        path.iter()
            .try_fold(node, |current, step| self.find(current, step))
    }

    /// Text of the subnode matched by `query`, if there is one.
    pub fn text_from_subnode<'e>(&self, node: &'e Element, query: &NodeQuery<'_>) -> Option<&'e str> {
        self.find(node, query).map(Element::text)
    }

    /// Attribute `attr` of the subnode matched by `query`, if both exist.
    pub fn attr_from_subnode<'e>(
        &self,
        node: &'e Element,
        query: &NodeQuery<'_>,
        attr: &str,
    ) -> Option<&'e str> {
        self.find(node, query).and_then(|found| found.attr(attr))
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(QueryCapabilities::detect())
    }
}

fn scan_siblings<'e>(node: &'e Element, tag: &str, key: &str, value: &str) -> Option<&'e Element> {
    for candidate in node.children_by_tag(tag) {
        if candidate.attr(key) == Some(value) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::ParseTree;

    const DOC: &[u8] = br#"<host>
        <hostname>plain.example.com</hostname>
        <hostname type="user" name="user.example.com"/>
        <hostname type="PTR" name="ptr.example.com"/>
        <hostname type="PTR" name="second-ptr.example.com"/>
        <record><hostname type="PTR" name="nested.example.com"/></record>
    </host>"#;

    fn engines() -> [QueryEngine; 2] {
        [
            QueryEngine::new(QueryCapabilities::detect()),
            QueryEngine::new(QueryCapabilities::fallback()),
        ]
    }

    #[test]
    fn child_with_attr_matches_first_sibling_on_both_paths() {
        let tree = ParseTree::parse(DOC).unwrap();
        let query = NodeQuery::ChildWithAttr {
            tag: "hostname",
            key: "type",
            value: "PTR",
        };

        for engine in engines() {
            assert_eq!(
                engine.attr_from_subnode(tree.root(), &query, "name"),
                Some("ptr.example.com")
            );
        }
    }

    #[test]
    fn scan_result_outlives_the_query_strings() {
        let tree = ParseTree::parse(DOC).unwrap();
        let engine = QueryEngine::new(QueryCapabilities::fallback());

        let found = {
            let (tag, key, value) = (String::from("hostname"), String::from("type"), String::from("PTR"));
            engine.find(
                tree.root(),
                &NodeQuery::ChildWithAttr {
                    tag: &tag,
                    key: &key,
                    value: &value,
                },
            )
        };
        assert_eq!(found.and_then(|e| e.attr("name")), Some("ptr.example.com"));
    }

    #[test]
    fn missing_attribute_is_not_a_match() {
        let tree = ParseTree::parse(DOC).unwrap();
        let query = NodeQuery::ChildWithAttr {
            tag: "hostname",
            key: "type",
            value: "CNAME",
        };

        for engine in engines() {
            assert!(engine.find(tree.root(), &query).is_none());
        }
    }

    #[test]
    fn child_query_returns_first_tag() {
        let tree = ParseTree::parse(DOC).unwrap();
        let engine = QueryEngine::default();
        assert_eq!(
            engine.text_from_subnode(tree.root(), &NodeQuery::Child("hostname")),
            Some("plain.example.com")
        );
        assert!(engine.find(tree.root(), &NodeQuery::Child("port")).is_none());
    }

    #[test]
    fn find_path_walks_nested_steps() {
        let tree = ParseTree::parse(DOC).unwrap();
        let path = [
            NodeQuery::Child("record"),
            NodeQuery::ChildWithAttr {
                tag: "hostname",
                key: "type",
                value: "PTR",
            },
        ];

        for engine in engines() {
            let found = engine.find_path(tree.root(), &path).unwrap();
            assert_eq!(found.attr("name"), Some("nested.example.com"));
        }
        assert!(
            QueryEngine::default()
                .find_path(tree.root(), &[NodeQuery::Child("missing"), NodeQuery::Child("hostname")])
                .is_none()
        );
    }
}
