//! The `#[solution_runner]` attribute of `aoc-framework`.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Error, Expr, Ident, Item, Token, Type, parse_macro_input};

/// The `key = value` arguments of the attribute.
struct RunnerArgs {
    name: Expr,
    parsed: Option<Type>,
    part_one: Type,
    part_two: Option<Type>,
}

/// One `key = value` argument, before checking which keys appeared.
enum RunnerArg {
    Name(Expr),
    Parsed(Type),
    PartOne(Type),
    PartTwo(Type),
}

impl Parse for RunnerArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        match key.to_string().as_str() {
            "name" => Ok(Self::Name(input.parse()?)),
            "parsed" => Ok(Self::Parsed(input.parse()?)),
            "part_one" => Ok(Self::PartOne(input.parse()?)),
            "part_two" => Ok(Self::PartTwo(input.parse()?)),
            other => Err(Error::new(
                key.span(),
                format!("unknown solution runner argument `{other}`"),
            )),
        }
    }
}

/// Store `value` in `slot`, failing if it was already set.
fn set_once<T>(slot: &mut Option<T>, value: T, key: &str) -> syn::Result<()> {
    if slot.replace(value).is_some() {
        return Err(Error::new(
            Span::call_site(),
            format!("`{key}` is given more than once"),
        ));
    }
    Ok(())
}

impl Parse for RunnerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;
        let mut parsed = None;
        let mut part_one = None;
        let mut part_two = None;

        for arg in Punctuated::<RunnerArg, Token![,]>::parse_terminated(input)? {
            match arg {
                RunnerArg::Name(value) => set_once(&mut name, value, "name")?,
                RunnerArg::Parsed(value) => set_once(&mut parsed, value, "parsed")?,
                RunnerArg::PartOne(value) => set_once(&mut part_one, value, "part_one")?,
                RunnerArg::PartTwo(value) => set_once(&mut part_two, value, "part_two")?,
            }
        }

        let missing = |key: &str| Error::new(Span::call_site(), format!("`{key}` is required"));
        Ok(Self {
            name: name.ok_or_else(|| missing("name"))?,
            parsed,
            part_one: part_one.ok_or_else(|| missing("part_one"))?,
            part_two,
        })
    }
}

/// Implement `aoc_framework::runner::SolutionRunner` for a struct or for the self type of an
/// `impl` block.
///
/// Arguments:
/// - `name`: an expression evaluating to `&str`, printed as the puzzle title.
/// - `part_one`: the type implementing `Solution<PartOne>`.
/// - `part_two` (optional): the type implementing `Solution<PartTwo>`.
/// - `parsed` (optional): the `ParseData` type both parts take. Without it, parts take `str`.
///
/// ```ignore
/// #[solution_runner(name = "Day 4: Scratchcards", parsed = Cards, part_one = Day04, part_two = Day04)]
/// impl super::Day<4> {}
/// ```
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, item: TokenStream) -> TokenStream {
    let RunnerArgs {
        name,
        parsed,
        part_one,
        part_two,
    } = parse_macro_input!(args as RunnerArgs);
    let item = parse_macro_input!(item as Item);

    let target = match &item {
        Item::Struct(item_struct) => {
            let ident = &item_struct.ident;
            quote!(#ident)
        }
        Item::Impl(item_impl) => {
            let self_ty = &item_impl.self_ty;
            quote!(#self_ty)
        }
        _ => {
            return Error::new(
                Span::call_site(),
                "#[solution_runner] applies to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    let parts = match part_two {
        Some(part_two) => quote!((#part_one, #part_two)),
        None => quote!((#part_one,)),
    };
    let run = match parsed {
        Some(parsed) => quote! {
            ::aoc_framework::runner::run_parsed::<#parsed, #parts>(#name, input, handler, timed)
        },
        None => quote! {
            ::aoc_framework::runner::run_raw::<#parts>(#name, input, handler, timed)
        },
    };

    quote! {
        #item

        impl ::aoc_framework::runner::SolutionRunner for #target {
            fn run(
                input: &str,
                handler: &mut dyn ::aoc_framework::runner::OutputHandler,
                timed: bool,
            ) -> ::aoc_framework::DynamicResult<()> {
                #run
            }
        }
    }
    .into()
}
