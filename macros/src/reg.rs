use inflector::Inflector;
use mmreg_macros_core::{bail, parse_lit_u32, parse_lit_u64, unkeywordize, RegMod};
use proc_macro::TokenStream;
use proc_macro2::{Literal, Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use std::collections::{HashMap, HashSet};
use syn::parse::{Parse, ParseStream, Result};
use syn::punctuated::Punctuated;
use syn::token::{Brace, Bracket};
use syn::{braced, bracketed, parse_macro_input, Attribute, Ident, LitInt, Token};

/// Items every generated module defines besides the fields.
const RESERVED_CONSTS: &[&str] = &["ADDRESS", "RESET"];
const RESERVED_TYPES: &[&str] = &["Reg", "Val"];

struct Reg {
    head: RegMod,
    address: LitInt,
    size: LitInt,
    reset: LitInt,
    traits: Vec<Ident>,
    fields: Vec<Field>,
}

struct Field {
    attrs: Vec<Attribute>,
    ident: Ident,
    offset: LitInt,
    width: LitInt,
    array: Option<FieldArray>,
    traits: Vec<Ident>,
    field_enum: Option<FieldEnum>,
}

struct FieldArray {
    len: LitInt,
    stride: LitInt,
}

struct FieldEnum {
    attrs: Vec<Attribute>,
    ident: Ident,
    variants: Option<Vec<Variant>>,
}

struct Variant {
    attrs: Vec<Attribute>,
    ident: Ident,
    value: LitInt,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Access {
    read: bool,
    write: bool,
}

struct Layout<'a> {
    field: &'a Field,
    offset: u32,
    width: u32,
    array: Option<(u32, u32)>,
    access: Access,
}

struct EnumDef<'a> {
    field_enum: &'a FieldEnum,
    variants: Vec<(Ident, Literal, Vec<Attribute>)>,
}

impl Parse for Reg {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let head = input.parse()?;
        let address = input.parse()?;
        let size = input.parse()?;
        let reset = input.parse()?;
        let mut traits = Vec::new();
        while !input.peek(Token![;]) {
            traits.push(input.parse()?);
        }
        input.parse::<Token![;]>()?;
        let mut fields = Vec::new();
        while !input.is_empty() {
            fields.push(input.parse()?);
        }
        Ok(Self { head, address, size, reset, traits, fields })
    }
}

impl Parse for Field {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let ident = input.parse()?;
        let content;
        braced!(content in input);
        let offset = content.parse()?;
        let width = content.parse()?;
        let array = if content.peek(Bracket) { Some(content.parse()?) } else { None };
        let mut traits = Vec::new();
        while !content.is_empty() && !content.peek(Token![enum]) && !content.peek(Token![#]) {
            traits.push(content.parse()?);
        }
        let field_enum = if content.is_empty() { None } else { Some(content.parse()?) };
        Ok(Self { attrs, ident, offset, width, array, traits, field_enum })
    }
}

impl Parse for FieldArray {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let content;
        bracketed!(content in input);
        let len = content.parse()?;
        content.parse::<Token![;]>()?;
        let stride = content.parse()?;
        Ok(Self { len, stride })
    }
}

impl Parse for FieldEnum {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        input.parse::<Token![enum]>()?;
        let ident = input.parse()?;
        let variants = if input.peek(Brace) {
            let content;
            braced!(content in input);
            let variants = Punctuated::<Variant, Token![,]>::parse_terminated(&content)?;
            Some(variants.into_iter().collect())
        } else {
            None
        };
        Ok(Self { attrs, ident, variants })
    }
}

impl Parse for Variant {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let value = input.parse()?;
        Ok(Self { attrs, ident, value })
    }
}

pub fn proc_macro(input: TokenStream) -> TokenStream {
    let reg = parse_macro_input!(input as Reg);
    gen_reg(&reg).unwrap_or_else(|err| err.to_compile_error()).into()
}

fn gen_reg(reg: &Reg) -> Result<TokenStream2> {
    let Reg { head: RegMod { attrs, vis, block, ident }, address, size, reset, traits, fields } =
        reg;
    let size_bits = parse_lit_u32(size)?;
    if !matches!(size_bits, 8 | 16 | 32 | 64) {
        bail!(size.span(), "unsupported register size {}, expected 8, 16, 32 or 64", size_bits);
    }
    let reset_bits = parse_lit_u64(reset)?;
    if size_bits < 64 && reset_bits >> size_bits != 0 {
        bail!(reset.span(), "reset value {:#x} doesn't fit in {} bits", reset_bits, size_bits);
    }
    let reg_access = parse_access(traits, "RReg", "WReg")?;
    if !reg_access.read && !reg_access.write {
        bail!(ident.span(), "register `{}` must be `RReg`, `WReg` or both", ident);
    }
    let (layouts, enums) = validate_fields(fields, size_bits, reg_access)?;

    let name = format!("{block}_{ident}");
    let mod_ident = Ident::new(&unkeywordize(name.to_snake_case().into()), Span::call_site());
    let raw_ty = format_ident!("u{}", size_bits);
    let access_ty = match (reg_access.read, reg_access.write) {
        (true, true) => quote!(Rw),
        (true, false) => quote!(Ro),
        (false, _) => quote!(Wo),
    };
    let debug_name = format!("{block}::{ident}");

    let mut field_tokens = Vec::new();
    let mut accessor_tokens = Vec::new();
    let mut debug_tokens = Vec::new();
    for layout in &layouts {
        gen_field(layout, &raw_ty, &mut field_tokens, &mut accessor_tokens, &mut debug_tokens);
    }
    let enum_tokens = enums.iter().map(|def| gen_enum(def, &raw_ty));

    Ok(quote! {
        #(#attrs)*
        #vis mod #mod_ident {
            /// Memory address of the register.
            pub const ADDRESS: usize = #address;

            /// Reset value of the register.
            pub const RESET: #raw_ty = #reset;

            /// Handle to the register.
            pub type Reg = ::mmreg::reg::RegHandle<Val, ::mmreg::reg::#access_ty>;

            /// Returns the handle to the register at [`ADDRESS`].
            ///
            /// # Safety
            ///
            /// [`ADDRESS`] must be a valid, properly aligned memory-mapped
            /// register for the whole lifetime of the program.
            #[inline]
            pub const unsafe fn take() -> Reg {
                unsafe { Reg::new(ADDRESS) }
            }

            /// Register value.
            #[derive(Clone, Copy, PartialEq, Eq, Hash)]
            #[repr(transparent)]
            pub struct Val(#raw_ty);

            impl ::mmreg::reg::RegVal for Val {
                type Raw = #raw_ty;

                const RESET: #raw_ty = RESET;

                #[inline]
                fn from_raw(raw: #raw_ty) -> Self {
                    Self(raw)
                }

                #[inline]
                fn raw(&self) -> #raw_ty {
                    self.0
                }

                #[inline]
                fn raw_mut(&mut self) -> &mut #raw_ty {
                    &mut self.0
                }
            }

            impl ::core::default::Default for Val {
                #[inline]
                fn default() -> Self {
                    Self(RESET)
                }
            }

            impl ::core::fmt::Debug for Val {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    f.debug_struct(#debug_name)
                        #(#debug_tokens)*
                        .finish()
                }
            }

            #(#field_tokens)*

            impl Val {
                #(#accessor_tokens)*
            }

            #(#enum_tokens)*
        }
    })
}

fn parse_access(traits: &[Ident], read: &str, write: &str) -> Result<Access> {
    let mut access = Access { read: false, write: false };
    for ident in traits {
        let flag = if ident == read {
            &mut access.read
        } else if ident == write {
            &mut access.write
        } else {
            bail!(ident.span(), "unknown marker `{}`, expected `{}` or `{}`", ident, read, write);
        };
        if *flag {
            bail!(ident.span(), "duplicate marker `{}`", ident);
        }
        *flag = true;
    }
    Ok(access)
}

fn validate_fields(
    fields: &[Field],
    size: u32,
    reg_access: Access,
) -> Result<(Vec<Layout<'_>>, Vec<EnumDef<'_>>)> {
    let mut names = HashSet::new();
    let mut accessors = HashSet::new();
    let mut enum_widths = HashMap::new();
    let mut occupied: Vec<(u128, &Ident)> = Vec::with_capacity(fields.len());
    let mut layouts = Vec::with_capacity(fields.len());
    let mut enums = Vec::new();
    for field in fields {
        let ident = &field.ident;
        let offset = parse_lit_u32(&field.offset)?;
        let width = parse_lit_u32(&field.width)?;
        if width == 0 {
            bail!(field.width.span(), "field `{}` has zero width", ident);
        }
        if offset >= size || width > size - offset {
            bail!(
                ident.span(),
                "field `{}` at bits {}..{} exceeds the {}-bit register",
                ident,
                offset,
                u64::from(offset) + u64::from(width),
                size
            );
        }
        let array = field.array.as_ref().map(|array| validate_array(array, offset, width, size));
        let array = array.transpose()?;
        let mask = field_mask(offset, width, array);

        let name = ident.to_string();
        if !names.insert(name.to_snake_case()) {
            bail!(ident.span(), "duplicate field `{}`", ident);
        }
        let const_name = name.to_screaming_snake_case();
        if RESERVED_CONSTS.contains(&const_name.as_str()) {
            bail!(
                ident.span(),
                "field `{}` collides with the register's `{}` constant",
                ident,
                const_name
            );
        }
        for (other_mask, other) in &occupied {
            if mask & other_mask != 0 {
                bail!(ident.span(), "field `{}` overlaps field `{}`", ident, other);
            }
        }
        occupied.push((mask, ident));

        let access = if field.traits.is_empty() {
            reg_access
        } else {
            parse_access(&field.traits, "RRegField", "WRegField")?
        };
        if (access.read && !reg_access.read) || (access.write && !reg_access.write) {
            bail!(ident.span(), "field `{}` allows an access its register doesn't", ident);
        }
        if !access.read && !access.write {
            bail!(ident.span(), "field `{}` must be `RRegField`, `WRegField` or both", ident);
        }

        let has_enum = field.field_enum.is_some();
        for accessor in accessor_names(&name.to_snake_case(), width, has_enum, access) {
            if !accessors.insert(accessor.clone()) {
                bail!(
                    ident.span(),
                    "accessor `{}` of field `{}` is already generated for another field",
                    accessor,
                    ident
                );
            }
        }

        if let Some(field_enum) = &field.field_enum {
            let enum_ident = &field_enum.ident;
            let enum_name = enum_ident.to_string();
            if RESERVED_TYPES.contains(&enum_name.as_str()) {
                bail!(enum_ident.span(), "enum `{}` collides with the register's type", enum_ident);
            }
            match (&field_enum.variants, enum_widths.get(&enum_name).copied()) {
                (Some(_), Some(_)) => {
                    bail!(
                        enum_ident.span(),
                        "enum `{}` is already defined, refer to it as `enum {}`",
                        enum_ident,
                        enum_ident
                    );
                }
                (Some(variants), None) => {
                    let variants = validate_enum(enum_ident, variants, width)?;
                    enum_widths.insert(enum_name, width);
                    enums.push(EnumDef { field_enum, variants });
                }
                (None, Some(enum_width)) => {
                    if enum_width != width {
                        bail!(
                            enum_ident.span(),
                            "enum `{}` is {} bits wide, field `{}` is {}",
                            enum_ident,
                            enum_width,
                            ident,
                            width
                        );
                    }
                }
                (None, None) => {
                    bail!(enum_ident.span(), "enum `{}` is not defined before", enum_ident);
                }
            }
        }
        layouts.push(Layout { field, offset, width, array, access });
    }
    Ok((layouts, enums))
}

fn validate_array(array: &FieldArray, offset: u32, width: u32, size: u32) -> Result<(u32, u32)> {
    let len = parse_lit_u32(&array.len)?;
    let stride = parse_lit_u32(&array.stride)?;
    if len == 0 {
        bail!(array.len.span(), "field array has no elements");
    }
    if stride < width {
        bail!(array.stride.span(), "stride {} is less than the field width {}", stride, width);
    }
    let end = u64::from(offset) + u64::from(len - 1) * u64::from(stride) + u64::from(width);
    if end > u64::from(size) {
        bail!(
            array.len.span(),
            "field array ends at bit {}, past the {}-bit register",
            end,
            size
        );
    }
    Ok((len, stride))
}

fn field_mask(offset: u32, width: u32, array: Option<(u32, u32)>) -> u128 {
    let element = (1_u128 << width) - 1;
    let (len, stride) = array.unwrap_or((1, 0));
    (0..len).fold(0, |mask, index| mask | (element << (offset + index * stride)))
}

fn accessor_names(snake: &str, width: u32, has_enum: bool, access: Access) -> Vec<String> {
    let mut names = Vec::new();
    if access.read {
        names.push(unkeywordize(snake.into()).into_owned());
    }
    if access.write {
        if width == 1 && !has_enum {
            names.push(format!("set_{snake}"));
            names.push(format!("clear_{snake}"));
            names.push(format!("toggle_{snake}"));
        }
        names.push(format!("write_{snake}"));
    }
    names
}

fn validate_enum(
    enum_ident: &Ident,
    variants: &[Variant],
    width: u32,
) -> Result<Vec<(Ident, Literal, Vec<Attribute>)>> {
    if variants.is_empty() {
        bail!(enum_ident.span(), "enum `{}` has no variants", enum_ident);
    }
    let max = if width == 64 { u64::MAX } else { (1_u64 << width) - 1 };
    let mut names = HashSet::new();
    let mut values = HashSet::new();
    let mut checked = Vec::with_capacity(variants.len());
    for Variant { attrs, ident, value } in variants {
        let name = ident.to_string().to_pascal_case();
        if !names.insert(name.clone()) {
            bail!(ident.span(), "duplicate variant `{}`", ident);
        }
        let bits = parse_lit_u64(value)?;
        if bits > max {
            bail!(value.span(), "value {:#x} doesn't fit in {}-bit field", bits, width);
        }
        if !values.insert(bits) {
            bail!(value.span(), "value {:#x} is already used by another variant", bits);
        }
        let ident = Ident::new(&name, ident.span());
        checked.push((ident, Literal::u64_unsuffixed(bits), attrs.clone()));
    }
    Ok(checked)
}

fn gen_enum(def: &EnumDef<'_>, raw_ty: &Ident) -> TokenStream2 {
    let FieldEnum { attrs, ident, .. } = def.field_enum;
    let variant_idents = def.variants.iter().map(|(ident, _, _)| ident).collect::<Vec<_>>();
    let variant_values = def.variants.iter().map(|(_, value, _)| value).collect::<Vec<_>>();
    let variant_attrs = def.variants.iter().map(|(_, _, attrs)| attrs).collect::<Vec<_>>();
    quote! {
        #(#attrs)*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(#raw_ty)]
        pub enum #ident {
            #(
                #(#variant_attrs)*
                #variant_idents = #variant_values,
            )*
        }

        impl #ident {
            /// Converts field bits into a variant. Returns `None` for an
            /// undefined encoding.
            #[inline]
            pub const fn from_bits(bits: #raw_ty) -> ::core::option::Option<Self> {
                match bits {
                    #(#variant_values => ::core::option::Option::Some(Self::#variant_idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            /// Returns the field bits of the variant.
            #[inline]
            pub const fn bits(self) -> #raw_ty {
                self as #raw_ty
            }
        }
    }
}

fn gen_field(
    layout: &Layout<'_>,
    raw_ty: &Ident,
    field_tokens: &mut Vec<TokenStream2>,
    accessor_tokens: &mut Vec<TokenStream2>,
    debug_tokens: &mut Vec<TokenStream2>,
) {
    let Layout { field, offset, width, array, access } = layout;
    let Field { attrs, ident, .. } = field;
    let name = ident.to_string();
    let snake = name.to_snake_case();
    let const_ident = Ident::new(&name.to_screaming_snake_case(), ident.span());
    let getter = Ident::new(&unkeywordize(snake.as_str().into()), ident.span());
    let offset = Literal::u32_unsuffixed(*offset);
    let width_lit = Literal::u32_unsuffixed(*width);

    // Array accessors take an index and report a bad one, scalar ones can't
    // fail unless the value itself is checked.
    let (index_arg, element, fallible) = if let Some((len, stride)) = array {
        let len = Literal::u32_unsuffixed(*len);
        let stride = Literal::u32_unsuffixed(*stride);
        field_tokens.push(quote! {
            #(#attrs)*
            pub const #const_ident: ::mmreg::reg::RegFieldArray<#raw_ty> =
                ::mmreg::reg::RegFieldArray::new(#name, #offset, #width_lit, #len, #stride);
        });
        debug_tokens.push(quote!(.field(#name, &#const_ident.decoded(self.0))));
        (quote!(index: usize,), quote!(#const_ident.get(index)?), true)
    } else {
        field_tokens.push(quote! {
            #(#attrs)*
            pub const #const_ident: ::mmreg::reg::RegField<#raw_ty> =
                ::mmreg::reg::RegField::new(#name, #offset, #width_lit);
        });
        debug_tokens.push(quote!(.field(#name, &#const_ident.decode(self.0))));
        (quote!(), quote!(#const_ident), false)
    };
    let returns = |ty: TokenStream2| {
        if fallible { quote!(::mmreg::reg::RegResult<#ty>) } else { ty }
    };
    let wrap = |expr: TokenStream2| {
        if fallible { quote!(::core::result::Result::Ok(#expr)) } else { expr }
    };
    let at = if fallible { " at `index`" } else { "" };
    let errors = if fallible {
        "\n\n# Errors\n\n`IndexOutOfRange` if `index` is past the end of the array."
    } else {
        ""
    };

    if let Some(FieldEnum { ident: enum_ident, .. }) = &field.field_enum {
        if access.read {
            let doc = format!(
                "Reads `{name}` field{at}. Returns `None` for an undefined encoding.{errors}"
            );
            let ty = returns(quote!(::core::option::Option<#enum_ident>));
            let body = wrap(quote!(#enum_ident::from_bits(#element.decode(self.0))));
            accessor_tokens.push(quote! {
                #[doc = #doc]
                #[inline]
                pub fn #getter(&self, #index_arg) -> #ty {
                    #body
                }
            });
        }
        if access.write {
            let write = format_ident!("write_{}", snake);
            let doc = format!("Writes `{name}` field{at}.{errors}");
            let ty = returns(quote!(&mut Self));
            let body = wrap(quote!(self));
            accessor_tokens.push(quote! {
                #[doc = #doc]
                #[inline]
                pub fn #write(&mut self, #index_arg value: #enum_ident) -> #ty {
                    self.0 = #element.insert(self.0, value.bits());
                    #body
                }
            });
        }
    } else if *width == 1 {
        if access.read {
            let doc = format!("Reads `{name}` bit{at}.{errors}");
            let ty = returns(quote!(bool));
            let body = wrap(quote!(#element.is_set(self.0)));
            accessor_tokens.push(quote! {
                #[doc = #doc]
                #[inline]
                pub fn #getter(&self, #index_arg) -> #ty {
                    #body
                }
            });
        }
        if access.write {
            let ty = returns(quote!(&mut Self));
            let body = wrap(quote!(self));
            let writers = [
                ("set", "Sets", quote!(#element.set(self.0))),
                ("clear", "Clears", quote!(#element.clear(self.0))),
                ("toggle", "Toggles", quote!(#element.toggle(self.0))),
            ];
            for (prefix, verb, update) in writers {
                let method = format_ident!("{}_{}", prefix, snake);
                let doc = format!("{verb} `{name}` bit{at}.{errors}");
                accessor_tokens.push(quote! {
                    #[doc = #doc]
                    #[inline]
                    pub fn #method(&mut self, #index_arg) -> #ty {
                        self.0 = #update;
                        #body
                    }
                });
            }
            let write = format_ident!("write_{}", snake);
            let doc = format!("Sets or clears `{name}` bit{at} according to `bit`.{errors}");
            accessor_tokens.push(quote! {
                #[doc = #doc]
                #[inline]
                pub fn #write(&mut self, #index_arg bit: bool) -> #ty {
                    let field = #element;
                    self.0 = if bit { field.set(self.0) } else { field.clear(self.0) };
                    #body
                }
            });
        }
    } else {
        if access.read {
            let doc = format!("Reads `{name}` bits{at}.{errors}");
            let ty = returns(quote!(#raw_ty));
            let body = wrap(quote!(#element.decode(self.0)));
            accessor_tokens.push(quote! {
                #[doc = #doc]
                #[inline]
                pub fn #getter(&self, #index_arg) -> #ty {
                    #body
                }
            });
        }
        if access.write {
            let write = format_ident!("write_{}", snake);
            let index_errors = if fallible {
                " `IndexOutOfRange` if `index` is past the end of the array."
            } else {
                ""
            };
            let doc = format!(
                "Writes `{name}` bits{at}.\n\n# Errors\n\n`ValueOutOfRange` if `bits` doesn't \
                 fit in {width} bits.{index_errors}"
            );
            accessor_tokens.push(quote! {
                #[doc = #doc]
                #[inline]
                pub fn #write(
                    &mut self,
                    #index_arg
                    bits: #raw_ty,
                ) -> ::mmreg::reg::RegResult<&mut Self> {
                    self.0 = #element.encode(self.0, bits)?;
                    ::core::result::Result::Ok(self)
                }
            });
        }
    }
}
