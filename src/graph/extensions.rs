use crate::graph::{amplify::Amplify, mix::Mix, node::GraphNode, through::Through};

pub trait NodeExt: GraphNode + Sized {
    fn amplify<M>(self, modulator: M) -> Amplify<Self, M> {
        Amplify::new(self, modulator)
    }

    fn through<F: GraphNode>(self, processor: F) -> Through<Self, F> {
        Through::new(self, processor)
    }

    fn mix<M: GraphNode>(self, other: M, own_gain: f32, other_gain: f32) -> Mix<Self, M> {
        Mix::new(self, other, own_gain, other_gain)
    }
}

impl<T: GraphNode> NodeExt for T {}
