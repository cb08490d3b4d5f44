//! Árvore mínima de elementos
//!
//! Os renderizadores produzem [`Element`] em vez de tocar um DOM real; o host
//! serializa com [`Element::to_html`] ou converte para seus próprios nós.

use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Texto concatenado de todos os descendentes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Primeiro descendente (ou o próprio elemento) com o id dado
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|node| match node {
            Node::Element(el) => el.find_by_id(id),
            Node::Text(_) => None,
        })
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(el) => el.write_html(out),
                Node::Text(text) => out.push_str(&escape(text)),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Filho de um contêiner de lista, com a chave da entidade quando houver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub key: Option<String>,
    pub node: Element,
}

/// Área de conteúdo da lista (`#content` ou `tbody`)
///
/// Cada renderização limpa e repopula o contêiner inteiro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    tag: String,
    id: String,
    children: Vec<Fragment>,
}

impl Container {
    pub fn new(tag: &str, id: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: id.to_string(),
            children: Vec::new(),
        }
    }

    pub fn replace_children(&mut self, children: Vec<Fragment>) {
        self.children = children;
    }

    /// Remove somente o fragmento da entidade; devolve se havia algum
    pub fn remove(&mut self, key: &str) -> bool {
        match self
            .children
            .iter()
            .position(|f| f.key.as_deref() == Some(key))
        {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[Fragment] {
        &self.children
    }

    pub fn keys(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter_map(|f| f.key.as_deref())
            .collect()
    }

    pub fn to_element(&self) -> Element {
        Element::new(&self.tag)
            .id(&self.id)
            .children(self.children.iter().map(|f| f.node.clone()))
    }
}
