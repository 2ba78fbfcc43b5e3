use proc_macro::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{Attribute, Data, DeriveInput, Field, Fields, Index, parse_macro_input, spanned::Spanned};

/// Derives `crate::walk::Walk` for a syntax node.
///
/// Fields are walked in declaration order, which for every node in `crate::ast`
/// is also source order. A field annotated with `#[walk(skip)]` is not visited.
#[proc_macro_derive(WalkAst, attributes(walk))]
pub fn derive_walk_ast(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let span = input.span();

    let walk_body = match generate_walk_body(&input.data) {
        Ok(body) => body,
        Err(err) => return err.into_compile_error().into(),
    };

    let expanded = quote_spanned! {span =>
        impl<'ast> crate::walk::Walk<'ast> for #name {
            #[inline]
            fn walk<V: crate::walk::Visitor<'ast> + ?Sized>(
                &self,
                a: &'ast crate::ast::AstArena,
                v: &mut V
            ) {
                #walk_body
            }
        }
    };

    expanded.into()
}

fn generate_walk_body(data: &Data) -> syn::Result<proc_macro2::TokenStream> {
    match data {
        Data::Struct(data_struct) => generate_fields_walk(&data_struct.fields),
        Data::Enum(data_enum) => {
            let arms = data_enum
                .variants
                .iter()
                .map(|variant| generate_variant_arm(&variant.ident, &variant.fields))
                .collect::<syn::Result<Vec<_>>>()?;

            Ok(quote! {
                match self {
                    #(#arms)*
                }
            })
        }
        Data::Union(u) => Err(syn::Error::new_spanned(
            u.union_token,
            "WalkAst cannot be derived for unions",
        )),
    }
}

/// Reads `#[walk(skip)]`; any other `walk` argument is rejected.
fn is_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("walk")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported walk attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

fn walked_fields(fields: &Fields) -> syn::Result<Vec<(usize, &Field)>> {
    let mut out = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        if !is_skipped(&field.attrs)? {
            out.push((i, field));
        }
    }
    Ok(out)
}

fn generate_fields_walk(fields: &Fields) -> syn::Result<proc_macro2::TokenStream> {
    let walk_calls = walked_fields(fields)?.into_iter().map(|(i, field)| {
        let field_access = match &field.ident {
            Some(ident) => quote! { &self.#ident },
            None => {
                let index = Index::from(i);
                quote! { &self.#index }
            }
        };
        quote! { crate::walk::Walk::walk(#field_access, a, v); }
    });

    Ok(quote! { #(#walk_calls)* })
}

fn generate_variant_arm(
    variant_name: &syn::Ident,
    fields: &Fields,
) -> syn::Result<proc_macro2::TokenStream> {
    let walked = walked_fields(fields)?;
    let arm = match fields {
        Fields::Unit => quote! { Self::#variant_name => {} },
        Fields::Named(_) => {
            let bindings: Vec<_> = walked.iter().filter_map(|(_, f)| f.ident.as_ref()).collect();
            let walk_calls = bindings.iter().map(|name| {
                quote! { crate::walk::Walk::walk(#name, a, v); }
            });

            quote! {
                Self::#variant_name { #(#bindings,)* .. } => {
                    #(#walk_calls)*
                }
            }
        }
        Fields::Unnamed(fields_unnamed) => {
            let patterns = (0..fields_unnamed.unnamed.len()).map(|i| {
                if walked.iter().any(|(w, _)| *w == i) {
                    let var = format_ident!("f{}", i);
                    quote! { #var }
                } else {
                    quote! { _ }
                }
            });
            let walk_calls = walked.iter().map(|(i, _)| {
                let var = format_ident!("f{}", i);
                quote! { crate::walk::Walk::walk(#var, a, v); }
            });

            quote! {
                Self::#variant_name(#(#patterns),*) => {
                    #(#walk_calls)*
                }
            }
        }
    };
    Ok(arm)
}
