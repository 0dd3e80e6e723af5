use proc_macro::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parse::Parser;
use syn::{ItemFn, LitInt, parse_quote};

/// Which attribute is being expanded.
pub(crate) enum Kind {
    Main,
    Test,
}

impl Kind {
    fn name(&self) -> &'static str {
        match self {
            Kind::Main => "main",
            Kind::Test => "test",
        }
    }
}

/// Arguments accepted by `#[strand::main]` and `#[strand::test]`.
#[derive(Default)]
struct Config {
    worker_threads: Option<LitInt>,
}

impl Config {
    fn parse(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if !meta.path.is_ident("worker_threads") {
            return Err(meta.error("unknown argument, expected `worker_threads = N`"));
        }

        let value: LitInt = meta.value()?.parse()?;
        if value.base10_parse::<usize>()? == 0 {
            return Err(syn::Error::new(
                value.span(),
                "`worker_threads` must be greater than zero",
            ));
        }

        self.worker_threads = Some(value);
        Ok(())
    }
}

/// Rewrites `async fn name() -> T { body }` into
/// `fn name() -> T { build runtime; runtime.block_on(async move { body }) }`.
pub(crate) fn expand(attr: TokenStream, item: TokenStream, kind: Kind) -> TokenStream {
    match try_expand(attr, item, kind) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn try_expand(
    attr: TokenStream,
    item: TokenStream,
    kind: Kind,
) -> syn::Result<proc_macro2::TokenStream> {
    let mut config = Config::default();
    syn::meta::parser(|meta| config.parse(meta)).parse(attr)?;

    let mut function: ItemFn = syn::parse(item)?;

    if function.sig.asyncness.take().is_none() {
        return Err(syn::Error::new_spanned(
            function.sig.fn_token,
            format!(
                "the `async` keyword is missing from the function declaration of `#[strand::{}]`",
                kind.name()
            ),
        ));
    }

    if !function.sig.inputs.is_empty() {
        return Err(syn::Error::new_spanned(
            &function.sig.inputs,
            format!("`#[strand::{}]` functions cannot take arguments", kind.name()),
        ));
    }

    let worker_threads = config
        .worker_threads
        .map(|n| quote!(.worker_threads(#n)));

    let body = &function.block;
    function.block = Box::new(parse_quote!({
        let runtime = ::strand::RuntimeBuilder::new()
            #worker_threads
            .build()
            .expect("failed to build the strand runtime");

        runtime.block_on(async move #body)
    }));

    let test_attr = match kind {
        Kind::Main => None,
        Kind::Test => Some(quote!(#[::core::prelude::v1::test])),
    };

    Ok(quote! {
        #test_attr
        #function
    })
}
