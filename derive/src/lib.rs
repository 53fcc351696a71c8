//! `#[derive(PatternStruct)]` for jsonpat.
//!
//! The derive records each field's declared name, visibility, raw tag text
//! and destination shape, and emits positional slot accessors. Tag grammar is
//! not interpreted here; malformed rules are reported by structure analysis
//! at the first decode.
//!
//! # Attributes
//! - `#[json("name[,opts]")]`: exact-name override (`"-"` ignores the field)
//! - `#[jsonpat("value[,mode]")]`: pattern rule, mode one of prefix, contains, suffix, regex
//! - `#[embedded]`: flatten the field's own fields into the parent
//!
//! Whether a field is a map or a value is left to trait resolution in the
//! generated code: a field whose type implements `MapSlot` is a map, so
//! aliases and `serde_json::Map` classify the same as a spelled-out
//! `HashMap<String, V>`. In a generic struct, a routed field whose type
//! mentions a type parameter needs the matching bound (`T: DeserializeOwned`)
//! on the struct itself.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Error, Field, Fields, LitStr, Visibility};

#[proc_macro_derive(PatternStruct, attributes(json, jsonpat, embedded))]
pub fn derive_pattern_struct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

enum Shape {
    /// Map or value, resolved by `jsonpat::schema::dispatch`.
    Field,
    Embedded,
}

struct FieldInfo<'a> {
    field: &'a Field,
    name: String,
    exported: bool,
    json_tag: Option<LitStr>,
    pattern_tag: Option<LitStr>,
    shape: Shape,
}

impl FieldInfo<'_> {
    /// A field with no slot is never written: private, or ignored by `#[json("-")]`.
    fn writable(&self) -> bool {
        if !self.exported {
            return false;
        }
        let ignored = self
            .json_tag
            .as_ref()
            .is_some_and(|tag| tag.value() == "-");
        !ignored || self.pattern_tag.is_some() || matches!(self.shape, Shape::Embedded)
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream2, Error> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(Error::new(
                data.enum_token.span(),
                "PatternStruct can only be derived for structs",
            ))
        }
        Data::Union(data) => {
            return Err(Error::new(
                data.union_token.span(),
                "PatternStruct can only be derived for structs",
            ))
        }
    };

    let kind = match fields {
        Fields::Named(_) => quote!(::jsonpat::schema::StructKind::Named),
        Fields::Unnamed(_) => quote!(::jsonpat::schema::StructKind::Tuple),
        Fields::Unit => quote!(::jsonpat::schema::StructKind::Unit),
    };

    let infos = fields
        .iter()
        .enumerate()
        .map(|(index, field)| field_info(index, field))
        .collect::<Result<Vec<_>, _>>()?;

    let decls = infos.iter().map(field_decl);
    let arms = infos
        .iter()
        .enumerate()
        .filter(|(_, info)| info.writable())
        .map(|(index, info)| slot_arm(index, info));

    let ident = &input.ident;
    let type_name = ident.unraw().to_string();

    let mut generics = input.generics.clone();
    if generics.type_params().next().is_some() {
        let where_clause = generics.make_where_clause();
        for param in input.generics.type_params() {
            let param = &param.ident;
            where_clause.predicates.push(syn::parse_quote!(#param: 'static));
        }
        for info in infos.iter().filter(|info| info.writable()) {
            if let Shape::Embedded = info.shape {
                let ty = &info.field.ty;
                where_clause
                    .predicates
                    .push(syn::parse_quote!(#ty: ::jsonpat::PatternStruct));
            }
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::jsonpat::PatternStruct for #ident #ty_generics #where_clause {
            fn describe() -> ::jsonpat::schema::StructDecl {
                #[allow(unused_imports)]
                use ::jsonpat::schema::dispatch::{MapField as _, ValueField as _};

                ::jsonpat::schema::StructDecl {
                    name: #type_name,
                    kind: #kind,
                    fields: ::std::vec![#(#decls),*],
                }
            }

            fn kind(&self) -> ::jsonpat::schema::StructKind {
                #kind
            }

            #[allow(clippy::match_single_binding)]
            fn slot(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<::jsonpat::schema::Slot<'_>> {
                #[allow(unused_imports)]
                use ::jsonpat::schema::dispatch::{MapField as _, ValueField as _};

                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

fn field_info(index: usize, field: &Field) -> Result<FieldInfo<'_>, Error> {
    let name = match &field.ident {
        Some(ident) => ident.unraw().to_string(),
        None => index.to_string(),
    };

    let mut json_tag = None;
    let mut pattern_tag = None;
    let mut embedded = false;

    for attr in &field.attrs {
        if attr.path().is_ident("json") {
            set_once(&mut json_tag, attr)?;
        } else if attr.path().is_ident("jsonpat") {
            set_once(&mut pattern_tag, attr)?;
        } else if attr.path().is_ident("embedded") {
            attr.meta.require_path_only()?;
            if embedded {
                return Err(Error::new(attr.span(), "duplicate #[embedded] attribute"));
            }
            embedded = true;
        }
    }

    let shape = if embedded { Shape::Embedded } else { Shape::Field };

    Ok(FieldInfo {
        field,
        name,
        exported: !matches!(field.vis, Visibility::Inherited),
        json_tag,
        pattern_tag,
        shape,
    })
}

fn set_once(slot: &mut Option<LitStr>, attr: &Attribute) -> Result<(), Error> {
    if slot.is_some() {
        return Err(Error::new(
            attr.span(),
            format!(
                "duplicate #[{}] attribute",
                attr.path().get_ident().map(|i| i.to_string()).unwrap_or_default()
            ),
        ));
    }
    *slot = Some(attr.parse_args::<LitStr>()?);
    Ok(())
}

fn field_decl(info: &FieldInfo<'_>) -> TokenStream2 {
    let name = &info.name;
    let exported = info.exported;
    let json_tag = optional(info.json_tag.as_ref());
    let pattern_tag = optional(info.pattern_tag.as_ref());
    let ty = &info.field.ty;
    let shape = match info.shape {
        // Never routed, so the type needs no slot impls.
        Shape::Field if !info.writable() => quote!(::jsonpat::schema::FieldShape::Value),
        Shape::Field => quote!(
            (&::jsonpat::schema::dispatch::FieldDispatch::<#ty>::empty()).shape()
        ),
        Shape::Embedded => quote!(::jsonpat::schema::FieldShape::Embedded(
            <#ty as ::jsonpat::PatternStruct>::describe
        )),
    };

    quote! {
        ::jsonpat::schema::FieldDecl {
            name: #name,
            exported: #exported,
            json_tag: #json_tag,
            pattern_tag: #pattern_tag,
            shape: #shape,
        }
    }
}

fn optional(tag: Option<&LitStr>) -> TokenStream2 {
    match tag {
        Some(lit) => quote!(::core::option::Option::Some(#lit)),
        None => quote!(::core::option::Option::None),
    }
}

fn slot_arm(index: usize, info: &FieldInfo<'_>) -> TokenStream2 {
    let member = match &info.field.ident {
        Some(ident) => quote!(#ident),
        None => {
            let index = syn::Index::from(index);
            quote!(#index)
        }
    };
    match info.shape {
        Shape::Field => quote! {
            #index => (&::jsonpat::schema::dispatch::FieldDispatch::new(&mut self.#member)).slot(),
        },
        Shape::Embedded => quote! {
            #index => ::core::option::Option::Some(
                ::jsonpat::schema::Slot::Embedded(&mut self.#member)
            ),
        },
    }
}
