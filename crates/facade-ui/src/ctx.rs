use crate::node::{NodeFactory, NodeId, NodeTree};
use crate::renderer::Renderer;

/// State threaded through one compilation: the backend services and the
/// node tree being built.
pub struct RenderCtx<'a> {
    pub renderer: &'a dyn Renderer,
    pub nodes: &'a mut NodeTree,
}

impl<'a> RenderCtx<'a> {
    pub fn new(renderer: &'a dyn Renderer, nodes: &'a mut NodeTree) -> Self {
        Self { renderer, nodes }
    }

    #[inline]
    pub fn create_node(&mut self, name: &str) -> NodeId {
        self.nodes.create_node(name)
    }
}
