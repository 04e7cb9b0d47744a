use std::future::Future;

/// Represents an async function over a tuple of arguments.
///
/// The associated `Future` is required to be `Send` so that handlers built
/// from plain async fns can run on spawned connection tasks.
pub trait FnTrait<Args>: Send + Sync {
    type Output;
    type Future: Future<Output = Self::Output> + Send;

    fn call(&self, args: Args) -> Self::Future;
}

/// impl `FnTrait` for `Fn`, from 0 parameters to 8 parameters
///
/// for example, it will impl Fn(A, B) like this:
/// ```no_run
/// # use std::future::Future;
/// # trait FnTrait<Args> { type Output; type Future; fn call(&self, args: Args) -> Self::Future; }
/// impl<Func, Fut, A, B> FnTrait<(A, B)> for Func
/// where
///     Func: Fn(A, B) -> Fut + Send + Sync,
///     Fut: Future + Send,
/// {
///     type Output = Fut::Output;
///     type Future = Fut;
///
///     fn call(&self, (A, B): (A, B)) -> Self::Future {
///         (self)(A, B)
///     }
/// }
/// ```
macro_rules! impl_fn_trait_for_fn ({ $($param:ident)* } => {
    impl<Func, Fut, $($param,)*> FnTrait<($($param,)*)> for Func
    where
        Func: Fn($($param),*) -> Fut + Send + Sync,
        Fut: Future + Send,
    {
        type Output = Fut::Output;
        type Future = Fut;

        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, ($($param,)*): ($($param,)*)) -> Self::Future {
            (self)($($param,)*)
        }
    }
});

impl_fn_trait_for_fn! {}
impl_fn_trait_for_fn! { A }
impl_fn_trait_for_fn! { A B }
impl_fn_trait_for_fn! { A B C }
impl_fn_trait_for_fn! { A B C D }
impl_fn_trait_for_fn! { A B C D E }
impl_fn_trait_for_fn! { A B C D E F }
impl_fn_trait_for_fn! { A B C D E F G }
impl_fn_trait_for_fn! { A B C D E F G H }
