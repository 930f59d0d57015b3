//! Source scanner
//!
//! Parses Rust sources with `syn` and derives a `ClientDescriptor` from the
//! inherent `impl` blocks of a client type and the structs they mention.
//! Only public methods taking `self` count as operations.

use super::attrs::{container_attrs, field_attrs};
use super::render::{render_path, render_type};
use crate::descriptor::{
    ClientDescriptor, CompositeType, FieldDescriptor, OperationDescriptor, TypeDescriptor,
    TypeRole,
};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use syn::ext::IdentExt;
use syn::{
    Fields, FnArg, GenericArgument, ImplItem, ImplItemFn, Item, ItemImpl, ItemStruct,
    PathArguments, PathSegment, Receiver, ReturnType, Type, TypeParamBound, Visibility,
};
use tracing::{debug, warn};

/// One parsed source file
struct ParsedSource {
    origin: String,
    file: syn::File,
}

/// Collects parsed Rust sources and extracts client descriptors from them
#[derive(Default)]
pub struct SourceScanner {
    sources: Vec<ParsedSource>,
}

impl SourceScanner {
    /// Create an empty scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of parsed files
    pub fn file_count(&self) -> usize {
        self.sources.len()
    }

    /// Add a file, or every `*.rs` file below a directory.
    ///
    /// Returns the number of files parsed.
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if path.is_dir() {
            let files = collect_rust_files(path)?;
            for file in &files {
                self.add_file(file)?;
            }
            Ok(files.len())
        } else {
            self.add_file(path)?;
            Ok(1)
        }
    }

    /// Parse one source file
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::source_error(path, e.to_string()))?;
        self.add_source(path.display().to_string(), &content)
    }

    /// Parse source text; `origin` is only used in messages
    pub fn add_source(&mut self, origin: impl Into<String>, source: &str) -> Result<()> {
        let origin = origin.into();
        let file = syn::parse_file(source).map_err(|e| Error::source_error(&origin, e.to_string()))?;
        debug!("Parsed {} ({} items)", origin, file.items.len());
        self.sources.push(ParsedSource { origin, file });
        Ok(())
    }

    /// Build the descriptor of `client` from everything parsed so far
    pub fn client_descriptor(&self, client: &str) -> Result<ClientDescriptor> {
        let mut structs = HashMap::new();
        for source in &self.sources {
            collect_structs(&source.origin, &source.file.items, &mut structs);
        }

        let resolver = TypeResolver {
            client,
            structs: &structs,
        };

        let mut impls = Vec::new();
        for source in &self.sources {
            collect_client_impls(client, &source.file.items, &mut impls);
        }
        if impls.is_empty() {
            return Err(Error::client_not_found(client));
        }

        let mut descriptor = ClientDescriptor::new(client);
        for item in impls {
            for impl_item in &item.items {
                let ImplItem::Fn(method) = impl_item else {
                    continue;
                };
                if !matches!(method.vis, Visibility::Public(_)) {
                    continue;
                }
                // Constructors and other associated functions are not operations
                if method.sig.receiver().is_none() {
                    debug!("Skipping associated function {}::{}", client, method.sig.ident);
                    continue;
                }
                descriptor.operations.push(resolver.operation(method));
            }
        }

        debug!(
            "Client {} exposes {} public methods across {} files",
            client,
            descriptor.operations.len(),
            self.sources.len()
        );

        Ok(descriptor)
    }
}

/// Scan paths and build one client descriptor (convenience function)
pub fn scan_client(client: &str, paths: &[PathBuf]) -> Result<ClientDescriptor> {
    let mut scanner = SourceScanner::new();
    for path in paths {
        scanner.add_path(path)?;
    }
    scanner.client_descriptor(client)
}

// ============================================================================
// Item Collection
// ============================================================================

fn collect_rust_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|e| Error::source_error(&current, e.to_string()))?;
        for entry in entries {
            let path = entry
                .map_err(|e| Error::source_error(&current, e.to_string()))?
                .path();
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.') || n == "target");
            if hidden {
                continue;
            }
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

fn collect_structs(origin: &str, items: &[Item], structs: &mut HashMap<String, CompositeType>) {
    for item in items {
        match item {
            Item::Struct(item_struct) => {
                let composite = composite_from_struct(item_struct);
                if structs.contains_key(&composite.name) {
                    warn!(
                        "Struct {} declared again in {}, keeping the first declaration",
                        composite.name, origin
                    );
                } else {
                    structs.insert(composite.name.clone(), composite);
                }
            }
            Item::Mod(module) => {
                if let Some((_, content)) = &module.content {
                    collect_structs(origin, content, structs);
                }
            }
            _ => {}
        }
    }
}

fn collect_client_impls<'a>(client: &str, items: &'a [Item], impls: &mut Vec<&'a ItemImpl>) {
    for item in items {
        match item {
            Item::Impl(item_impl) if item_impl.trait_.is_none() => {
                if last_segment(&item_impl.self_ty).is_some_and(|s| s.ident == client) {
                    impls.push(item_impl);
                }
            }
            Item::Mod(module) => {
                if let Some((_, content)) = &module.content {
                    collect_client_impls(client, content, impls);
                }
            }
            _ => {}
        }
    }
}

fn composite_from_struct(item: &ItemStruct) -> CompositeType {
    let container = container_attrs(&item.attrs);

    let fields: Vec<FieldDescriptor> = match &item.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| {
                let name = field.ident.as_ref()?.unraw().to_string();
                let attrs = field_attrs(&field.attrs);
                let alias = attrs.rename.or_else(|| {
                    container
                        .rename_all
                        .map(|rule| rule.apply_to_field(&name))
                        .filter(|renamed| renamed != &name)
                });
                Some(FieldDescriptor {
                    name,
                    alias,
                    type_name: render_type(&field.ty),
                    skip: attrs.skip,
                })
            })
            .collect(),
        Fields::Unnamed(_) | Fields::Unit => Vec::new(),
    };

    CompositeType::new(item.ident.unraw().to_string(), fields)
}

// ============================================================================
// Type Resolution
// ============================================================================

struct TypeResolver<'a> {
    client: &'a str,
    structs: &'a HashMap<String, CompositeType>,
}

impl TypeResolver<'_> {
    fn operation(&self, method: &ImplItemFn) -> OperationDescriptor {
        let sig = &method.sig;
        let mut op = OperationDescriptor::new(sig.ident.unraw().to_string());

        for input in &sig.inputs {
            let param = match input {
                FnArg::Receiver(receiver) => self.receiver(receiver),
                FnArg::Typed(typed) => self.resolve(&typed.ty),
            };
            op.params.push(param);
        }

        if let ReturnType::Type(_, ty) = &sig.output {
            op.returns = self.split_return(ty);
        }

        op
    }

    fn receiver(&self, receiver: &Receiver) -> TypeDescriptor {
        let display = match (receiver.reference.is_some(), receiver.colon_token.is_some()) {
            (true, _) if receiver.mutability.is_some() => format!("&mut {}", self.client),
            (true, _) => format!("&{}", self.client),
            (false, true) => render_type(&receiver.ty).replace("Self", self.client),
            (false, false) => self.client.to_string(),
        };
        TypeDescriptor::named(self.client)
            .with_display(display)
            .with_role(TypeRole::ClientHandle)
    }

    /// Decompose a return type into the values the caller receives
    fn split_return(&self, ty: &Type) -> Vec<TypeDescriptor> {
        if let Some(output) = future_output(ty) {
            return self.split_return(output);
        }

        match ty {
            Type::Tuple(tuple) => tuple
                .elems
                .iter()
                .flat_map(|elem| self.split_return(elem))
                .collect(),
            Type::Paren(paren) => self.split_return(&paren.elem),
            Type::Group(group) => self.split_return(&group.elem),
            _ => {
                let Some(segment) = last_segment(ty).filter(|s| s.ident == "Result") else {
                    return vec![self.resolve(ty)];
                };
                let args = type_args(segment);
                let Some(ok) = args.first() else {
                    return vec![self.resolve(ty)];
                };

                let mut returns = self.split_return(ok);
                if let Some(err) = args.get(1) {
                    returns.push(self.resolve(err).with_role(TypeRole::Error));
                }
                returns
            }
        }
    }

    /// Resolve a type, attaching its rendered display name
    fn resolve(&self, ty: &Type) -> TypeDescriptor {
        self.resolve_kind(ty).with_display(render_type(ty))
    }

    fn resolve_kind(&self, ty: &Type) -> TypeDescriptor {
        match ty {
            Type::Reference(reference) => wrap(TypeDescriptor::pointer, self.resolve(&reference.elem)),
            Type::Paren(paren) => self.resolve_kind(&paren.elem),
            Type::Group(group) => self.resolve_kind(&group.elem),
            Type::Path(type_path) if type_path.qself.is_none() => {
                let Some(segment) = type_path.path.segments.last() else {
                    return TypeDescriptor::named(render_type(ty));
                };
                let ident = segment.ident.unraw().to_string();
                let args = type_args(segment);

                match (ident.as_str(), args.as_slice()) {
                    ("Box" | "Arc" | "Rc", [inner]) => {
                        wrap(TypeDescriptor::pointer, self.resolve(inner))
                    }
                    ("Option", [inner]) => wrap(TypeDescriptor::optional, self.resolve(inner)),
                    _ if ident == self.client => TypeDescriptor::named(render_path(&type_path.path))
                        .with_role(TypeRole::ClientHandle),
                    _ => match self.structs.get(&ident) {
                        Some(composite) => TypeDescriptor::composite(composite.clone()),
                        None => TypeDescriptor::named(render_path(&type_path.path)),
                    },
                }
            }
            _ => TypeDescriptor::named(render_type(ty)),
        }
    }
}

/// Wrap a resolved type, carrying its role outward
fn wrap(make: fn(TypeDescriptor) -> TypeDescriptor, inner: TypeDescriptor) -> TypeDescriptor {
    let role = inner.role;
    make(inner).with_role(role)
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        _ => None,
    }
}

fn type_args(segment: &PathSegment) -> Vec<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Vec::new();
    };
    args.args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        })
        .collect()
}

/// `Output` of `impl Future<Output = T>`, `dyn Future<Output = T>`, or a
/// `Pin`/`Box` around one
fn future_output(ty: &Type) -> Option<&Type> {
    let bounds = match ty {
        Type::ImplTrait(impl_trait) => &impl_trait.bounds,
        Type::TraitObject(object) => &object.bounds,
        Type::Path(_) => {
            let segment = last_segment(ty)?;
            if segment.ident != "Pin" && segment.ident != "Box" {
                return None;
            }
            return match type_args(segment).as_slice() {
                [inner] => future_output(*inner),
                _ => None,
            };
        }
        _ => return None,
    };

    bounds.iter().find_map(|bound| {
        let TypeParamBound::Trait(trait_bound) = bound else {
            return None;
        };
        let segment = trait_bound.path.segments.last()?;
        if segment.ident != "Future" {
            return None;
        }
        let PathArguments::AngleBracketed(args) = &segment.arguments else {
            return None;
        };
        args.args.iter().find_map(|arg| match arg {
            GenericArgument::AssocType(assoc) if assoc.ident == "Output" => Some(&assoc.ty),
            _ => None,
        })
    })
}
