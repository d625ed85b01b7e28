#![allow(dead_code, unreachable_pub)]

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use telqr::{
    Dom, DomEvent, EventKind, EventSubscription, Listener, QrRenderer, QrRequest, TelQrError,
};

pub const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const MOBILE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(usize);

struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
    listeners: Vec<(u64, EventKind, Rc<dyn Fn(&dyn DomEvent)>)>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: Vec::new(),
            styles: Vec::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

const HEAD: usize = 0;
const BODY: usize = 1;

/// Event object recording what listeners asked for.
#[derive(Debug, Default)]
pub struct FakeEvent {
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl FakeEvent {
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl DomEvent for FakeEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }
}

struct Inner {
    nodes: RefCell<Vec<Node>>,
    user_agent: Option<String>,
    navigations: RefCell<Vec<String>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    fail_tag: RefCell<Option<String>>,
    next_listener: Cell<u64>,
}

/// Listener handle; dropping it removes the listener from its node.
#[derive(Debug)]
pub struct FakeSubscription {
    dom: Option<Weak<Inner>>,
    node: usize,
    id: u64,
}

impl EventSubscription for FakeSubscription {
    fn forget(mut self) {
        self.dom = None;
    }
}

impl Drop for FakeSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.dom.take().and_then(|dom| dom.upgrade()) {
            inner.nodes.borrow_mut()[self.node].listeners.retain(|(id, _, _)| *id != self.id);
        }
    }
}

/// In-memory document with bubbling click dispatch and a manual task queue.
#[derive(Clone)]
pub struct FakeDom {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for FakeDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeDom").field("nodes", &self.inner.nodes.borrow().len()).finish()
    }
}

impl FakeDom {
    pub fn new(user_agent: Option<&str>) -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            inner: Rc::new(Inner {
                nodes: RefCell::new(vec![Node::new("head"), Node::new("body")]),
                user_agent: user_agent.map(ToOwned::to_owned),
                navigations: RefCell::new(Vec::new()),
                pool: RefCell::new(pool),
                spawner,
                fail_tag: RefCell::new(None),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn desktop() -> Self {
        Self::new(Some(DESKTOP_UA))
    }

    pub fn mobile() -> Self {
        Self::new(Some(MOBILE_UA))
    }

    /// Appends `<a href=..>` to the body.
    pub fn add_link(&self, href: &str) -> NodeRef {
        let link = self.create_element("a").expect("create anchor");
        self.set_attribute(&link, "href", href).expect("set href");
        self.append_to_body(&link).expect("append anchor");
        link
    }

    /// Makes `create_element(tag)` fail from now on.
    pub fn fail_on_create(&self, tag: &str) {
        *self.inner.fail_tag.borrow_mut() = Some(tag.to_owned());
    }

    /// Dispatches a bubbling click and returns the event after dispatch.
    pub fn click(&self, target: &NodeRef) -> FakeEvent {
        let event = FakeEvent::default();
        let mut current = Some(target.0);
        while let Some(id) = current {
            let (listeners, parent) = {
                let nodes = self.inner.nodes.borrow();
                let node = &nodes[id];
                let listeners: Vec<_> = node
                    .listeners
                    .iter()
                    .filter(|(_, kind, _)| *kind == EventKind::Click)
                    .map(|(_, _, listener)| Rc::clone(listener))
                    .collect();
                (listeners, node.parent)
            };
            for listener in listeners {
                listener(&event);
            }
            if event.propagation_stopped.get() {
                break;
            }
            current = parent;
        }
        event
    }

    /// Fires a non-bubbling event (`load`, `error`) on `target`.
    pub fn fire(&self, target: &NodeRef, kind: EventKind) {
        let listeners: Vec<_> = self.inner.nodes.borrow()[target.0]
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();
        let event = FakeEvent::default();
        for listener in listeners {
            listener(&event);
        }
    }

    /// Drives queued tasks until none can make progress.
    pub fn run(&self) {
        self.inner.pool.borrow_mut().run_until_stalled();
    }

    pub fn is_connected(&self, node: &NodeRef) -> bool {
        let nodes = self.inner.nodes.borrow();
        let mut current = node.0;
        loop {
            if current == HEAD || current == BODY {
                return true;
            }
            match nodes[current].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Connected elements carrying `class`, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeRef> {
        self.connected()
            .into_iter()
            .filter(|node| self.attribute(node, "class").as_deref() == Some(class))
            .collect()
    }

    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeRef> {
        self.connected().into_iter().filter(|node| self.tag(node) == tag).collect()
    }

    /// Script elements in the head.
    pub fn scripts(&self) -> Vec<NodeRef> {
        self.inner.nodes.borrow()[HEAD]
            .children
            .iter()
            .copied()
            .map(NodeRef)
            .filter(|node| self.tag(node) == "script")
            .collect()
    }

    pub fn tag(&self, node: &NodeRef) -> String {
        self.inner.nodes.borrow()[node.0].tag.clone()
    }

    pub fn text(&self, node: &NodeRef) -> String {
        self.inner.nodes.borrow()[node.0].text.clone()
    }

    pub fn style(&self, node: &NodeRef, property: &str) -> Option<String> {
        self.inner.nodes.borrow()[node.0]
            .styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.clone())
    }

    pub fn children(&self, node: &NodeRef) -> Vec<NodeRef> {
        self.inner.nodes.borrow()[node.0].children.iter().copied().map(NodeRef).collect()
    }

    pub fn listener_count(&self, node: &NodeRef, kind: EventKind) -> usize {
        self.inner.nodes.borrow()[node.0].listeners.iter().filter(|(_, k, _)| *k == kind).count()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.inner.navigations.borrow().clone()
    }

    fn connected(&self) -> Vec<NodeRef> {
        let nodes = self.inner.nodes.borrow();
        let mut out = Vec::new();
        let mut stack = vec![BODY, HEAD];
        while let Some(id) = stack.pop() {
            if id != HEAD && id != BODY {
                out.push(NodeRef(id));
            }
            stack.extend(nodes[id].children.iter().rev().copied());
        }
        out
    }

    fn attach(&self, parent: usize, child: &NodeRef) {
        self.remove(child);
        let mut nodes = self.inner.nodes.borrow_mut();
        nodes[child.0].parent = Some(parent);
        nodes[parent].children.push(child.0);
    }
}

/// Parses `tag[attr^="prefix"]`, the only selector form the component uses.
fn parse_prefix_selector(selector: &str) -> Option<(&str, &str, &str)> {
    let (tag, rest) = selector.split_once('[')?;
    let (attr, rest) = rest.split_once("^=")?;
    let prefix = rest.strip_suffix(']')?.trim_matches('"');
    Some((tag, attr, prefix))
}

impl Dom for FakeDom {
    type Element = NodeRef;
    type Subscription = FakeSubscription;

    fn user_agent(&self) -> Option<String> {
        self.inner.user_agent.clone()
    }

    fn query_selector_all(&self, selector: &str) -> telqr::Result<Vec<NodeRef>> {
        let (tag, attr, prefix) = parse_prefix_selector(selector)
            .ok_or_else(|| TelQrError::dom(format!("unsupported selector {selector}")))?;
        Ok(self
            .connected()
            .into_iter()
            .filter(|node| {
                self.tag(node) == tag
                    && self.attribute(node, attr).is_some_and(|value| value.starts_with(prefix))
            })
            .collect())
    }

    fn create_element(&self, tag: &str) -> telqr::Result<NodeRef> {
        if self.inner.fail_tag.borrow().as_deref() == Some(tag) {
            return Err(TelQrError::dom(format!("cannot create <{tag}>")));
        }
        let mut nodes = self.inner.nodes.borrow_mut();
        nodes.push(Node::new(tag));
        Ok(NodeRef(nodes.len() - 1))
    }

    fn attribute(&self, element: &NodeRef, name: &str) -> Option<String> {
        self.inner.nodes.borrow()[element.0].attribute(name).map(ToOwned::to_owned)
    }

    fn set_attribute(&self, element: &NodeRef, name: &str, value: &str) -> telqr::Result<()> {
        let mut nodes = self.inner.nodes.borrow_mut();
        let attributes = &mut nodes[element.0].attributes;
        match attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, slot)) => *slot = value.to_owned(),
            None => attributes.push((name.to_owned(), value.to_owned())),
        }
        Ok(())
    }

    fn set_text(&self, element: &NodeRef, text: &str) {
        text.clone_into(&mut self.inner.nodes.borrow_mut()[element.0].text);
    }

    fn set_style(&self, element: &NodeRef, property: &str, value: &str) -> telqr::Result<()> {
        let mut nodes = self.inner.nodes.borrow_mut();
        let styles = &mut nodes[element.0].styles;
        match styles.iter_mut().find(|(k, _)| k == property) {
            Some((_, slot)) => *slot = value.to_owned(),
            None => styles.push((property.to_owned(), value.to_owned())),
        }
        Ok(())
    }

    fn append_child(&self, parent: &NodeRef, child: &NodeRef) -> telqr::Result<()> {
        self.attach(parent.0, child);
        Ok(())
    }

    fn append_to_body(&self, element: &NodeRef) -> telqr::Result<()> {
        self.attach(BODY, element);
        Ok(())
    }

    fn append_to_head(&self, element: &NodeRef) -> telqr::Result<()> {
        self.attach(HEAD, element);
        Ok(())
    }

    fn remove(&self, element: &NodeRef) {
        let mut nodes = self.inner.nodes.borrow_mut();
        if let Some(parent) = nodes[element.0].parent.take() {
            nodes[parent].children.retain(|id| *id != element.0);
        }
    }

    fn add_event_listener(
        &self,
        element: &NodeRef,
        kind: EventKind,
        listener: Listener,
    ) -> telqr::Result<FakeSubscription> {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.nodes.borrow_mut()[element.0].listeners.push((id, kind, Rc::from(listener)));
        Ok(FakeSubscription { dom: Some(Rc::downgrade(&self.inner)), node: element.0, id })
    }

    fn navigate(&self, href: &str) -> telqr::Result<()> {
        self.inner.navigations.borrow_mut().push(href.to_owned());
        Ok(())
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self.inner.spawner.spawn_local(task).expect("local pool accepts tasks");
    }
}

/// Code renderer that records requests and draws a placeholder `<canvas>`.
#[derive(Debug, Clone, Default)]
pub struct FakeQr {
    available: Rc<Cell<bool>>,
    requests: Rc<RefCell<Vec<QrRequest>>>,
}

impl FakeQr {
    /// A renderer whose library is already present in the page.
    pub fn preloaded() -> Self {
        let qr = Self::default();
        qr.available.set(true);
        qr
    }

    pub fn requests(&self) -> Vec<QrRequest> {
        self.requests.borrow().clone()
    }
}

impl QrRenderer<FakeDom> for FakeQr {
    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn render(&self, dom: &FakeDom, container: &NodeRef, request: &QrRequest) -> telqr::Result<()> {
        self.requests.borrow_mut().push(request.clone());
        let canvas = dom.create_element("canvas")?;
        dom.set_attribute(&canvas, "data-text", &request.text)?;
        dom.append_child(container, &canvas)
    }
}
