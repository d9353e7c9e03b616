//! Macros for ergonomic graph construction.

/// Build a [`TransitionGraph`](crate::graph::TransitionGraph) from literal edges.
///
/// # Example
///
/// ```
/// use checkstate::transition_graph;
///
/// let graph = transition_graph! {
///     "CREATED" => ["UPDATED"],
///     "UPDATED" => ["COMPLETED", "UPDATED"],
///     "COMPLETED" => [],
/// };
///
/// assert!(graph.permits("CREATED", "UPDATED"));
/// assert!(graph.is_terminal("COMPLETED"));
/// ```
#[macro_export]
macro_rules! transition_graph {
    (
        $(
            $from:expr => [ $( $to:expr ),* $(,)? ]
        ),* $(,)?
    ) => {{
        let builder = $crate::graph::TransitionGraphBuilder::new();
        $(
            let destinations: ::std::vec::Vec<$crate::core::State> =
                ::std::vec![ $( $crate::core::State::from($to) ),* ];
            let builder = builder.allow_all($from, destinations);
        )*
        builder.build()
    }};
}
