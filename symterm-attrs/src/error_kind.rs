use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    Attribute,
    Data,
    DeriveInput,
    Expr,
    Fields,
    Ident,
    Result,
};

/// The tags of the `error` attribute.
#[derive(Debug, Default)]
struct ErrorArgs {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl ErrorArgs {
    /// Collects the tags from the `error` attribute, if there is one.
    fn from_attributes(attributes: &[Attribute]) -> Result<Self> {
        let mut args = ErrorArgs::default();
        let Some(attr) = attributes.iter().find(|attr| attr.path().is_ident("error")) else {
            return Ok(args);
        };

        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident("message") {
                &mut args.message
            } else if meta.path.is_ident("labels") {
                &mut args.labels
            } else if meta.path.is_ident("help") {
                &mut args.help
            } else {
                return Err(meta.error("expected one of `message`, `labels` or `help`"));
            };

            *slot = Some(meta.value()?.parse()?);
            Ok(())
        })?;

        Ok(args)
    }
}

/// A unit struct or a struct with named fields that `ErrorKind` is derived for.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,

    /// Names of the struct's fields, which are in scope of every tag expression.
    field_names: Vec<Ident>,

    message: Expr,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let input = input.parse::<DeriveInput>()?;
        let data = match input.data {
            Data::Struct(data) => data,
            _ => return Err(syn::Error::new_spanned(&input.ident, "`ErrorKind` can only be derived for structs")),
        };

        let field_names = match data.fields {
            Fields::Named(fields) => fields.named.into_iter().filter_map(|field| field.ident).collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(fields) => {
                return Err(syn::Error::new_spanned(fields, "`ErrorKind` cannot be derived for tuple structs"));
            },
        };

        let args = ErrorArgs::from_attributes(&input.attrs)?;
        let Some(message) = args.message else {
            return Err(syn::Error::new_spanned(&input.ident, "missing `#[error(message = ...)]` attribute"));
        };

        Ok(ErrorKindTarget {
            name: input.ident,
            field_names,
            message,
            labels: args.labels,
            help: args.help,
        })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let name = &self.name;
        let field_names = &self.field_names;
        let bind_fields = quote! {
            #[allow(unused_variables)]
            let #name { #(#field_names),* } = self;
        };

        let message = &self.message;
        let labels = match &self.labels {
            Some(labels) => quote! { #labels },
            None => quote! { ([] as [&str; 0]) },
        };
        let help = self.help.as_ref().map(|help| quote! { report = report.with_help(#help); });

        tokens.extend(quote! {
            fn message(&self) -> String {
                #bind_fields
                (#message).to_string()
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bind_fields

                // labels without a span are dropped
                let labels = #labels
                    .into_iter()
                    .zip(spans.iter())
                    .map(|(text, span)| {
                        let label = ariadne::Label::new((src_id, span.clone()))
                            .with_color(symterm_error::EXPR);
                        if text.is_empty() { label } else { label.with_message(text) }
                    })
                    .collect::<Vec<_>>();

                let offset = spans.first().map_or(0, |span| span.start);
                #[allow(unused_mut)]
                let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                    .with_message(self.message())
                    .with_labels(labels);
                #help
                report.finish()
            }
        });
    }
}
