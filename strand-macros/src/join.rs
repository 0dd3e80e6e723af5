use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Expr, Token};

/// Expands `join!(a, b, ...)`.
///
/// Every future is wrapped in a `MaybeDone` slot; a `poll_fn` polls the
/// unfinished slots in argument order and resolves once all are done.
pub(crate) fn expand(input: TokenStream) -> TokenStream {
    let parser = Punctuated::<Expr, Token![,]>::parse_terminated;

    let futures = match parser.parse(input) {
        Ok(futures) => futures,
        Err(err) => return err.to_compile_error().into(),
    };

    match futures.len() {
        0 => quote!(()).into(),
        1 => {
            let future = &futures[0];
            quote!((#future).await).into()
        }
        _ => expand_many(futures.iter().collect()),
    }
}

fn expand_many(futures: Vec<&Expr>) -> TokenStream {
    let slots: Vec<_> = (0..futures.len())
        .map(|i| format_ident!("__strand_join_{}", i))
        .collect();

    quote!({
        #( let mut #slots = ::strand::__private::MaybeDone::new(#futures); )*

        ::std::future::poll_fn(move |cx| {
            let mut done = true;
            #( done &= #slots.poll_step(cx); )*

            if !done {
                return ::std::task::Poll::Pending;
            }

            ::std::task::Poll::Ready((
                #( #slots.take_output().expect("`join!` polled after completion"), )*
            ))
        })
        .await
    })
    .into()
}
