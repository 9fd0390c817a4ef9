use proc_macro::TokenStream;
use proc_macro_error2::{abort, proc_macro_error};
use quote::quote;
use syn::{
    Field, Fields, ItemStruct,
    parse::{Nothing, Parser},
    parse_macro_input,
};

extern crate proc_macro;

/// Implements `crate::plugin::Event`, naming the event after its struct so the event bus
/// can route it to handlers registered for that type and downcast it back.
#[proc_macro_derive(Event)]
pub fn event(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics crate::plugin::Event for #name #ty_generics #where_clause {
            fn get_name_static() -> &'static str {
                stringify!(#name)
            }

            fn get_name(&self) -> &'static str {
                stringify!(#name)
            }

            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    }
    .into()
}

/// Adds a `cancelled` flag to an event struct and implements `crate::plugin::Cancellable`.
///
/// Constructors have to initialise `cancelled` themselves. Only structs with named fields
/// are accepted.
#[proc_macro_error]
#[proc_macro_attribute]
pub fn cancellable(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_struct = parse_macro_input!(input as ItemStruct);
    let name = item_struct.ident.clone();
    let _ = parse_macro_input!(args as Nothing);

    let Fields::Named(ref mut fields) = item_struct.fields else {
        abort!(
            item_struct.ident,
            "#[cancellable] can only be used on structs with named fields"
        );
    };

    let cancelled = match Field::parse_named.parse2(quote! {
        /// A boolean indicating cancel state of the event.
        pub cancelled: bool
    }) {
        Ok(field) => field,
        Err(err) => return err.to_compile_error().into(),
    };
    fields.named.push(cancelled);

    quote! {
        #item_struct

        impl crate::plugin::Cancellable for #name {
            fn cancelled(&self) -> bool {
                self.cancelled
            }

            fn set_cancelled(&mut self, cancelled: bool) {
                self.cancelled = cancelled;
            }
        }
    }
    .into()
}
