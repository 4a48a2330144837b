//! The Rust renderer.
//!
//! Generated declarations implement the bind contracts from `bric-bind`;
//! decode bodies thread pointer components with `.at(...)` as they
//! descend. Nested declarations flatten into the module namespace with
//! parent-concatenated names.

use bric::Bric;

use crate::code::{Access, CodeDecl, CodeModule, CodeType, Field, Prim, RestField, SumCase};

const TAB: &str = "    ";

pub fn render_module(module: &CodeModule) -> String {
    let mut body = String::new();
    for decl in &module.types {
        render_decl(&mut body, decl, "");
    }
    let mut out = String::from("//! Generated by curio; do not edit.\n");
    let uses = use_lines(module, &body);
    if !uses.is_empty() {
        out.push('\n');
        out.push_str(&uses);
    }
    out.push_str(&body);
    out
}

fn use_lines(module: &CodeModule, body: &str) -> String {
    let mut out = String::new();
    if module.imports.contains("bric") && body.contains("Bric") {
        out.push_str("use bric::Bric;\n");
    }
    if module.imports.contains("bric_bind") {
        let mut items = Vec::new();
        if body.contains("helpers::") {
            items.push("helpers");
        }
        if body.contains("BindError") {
            items.push("BindError");
        }
        if body.contains("BindErrorKind") {
            items.push("BindErrorKind");
        }
        if body.contains("FromBric") {
            items.push("FromBric");
        }
        if body.contains("ToBric") {
            items.push("ToBric");
        }
        if !items.is_empty() {
            out.push_str(&format!("use bric_bind::{{{}}};\n", items.join(", ")));
        }
    }
    if module.imports.contains("indexmap") && body.contains("IndexMap") {
        out.push_str("use indexmap::IndexMap;\n");
    }
    out
}

fn access_str(access: Access) -> &'static str {
    match access {
        Access::Public => "pub ",
        Access::Crate => "pub(crate) ",
        Access::Private => "",
    }
}

fn push_doc(out: &mut String, doc: &Option<String>, indent: &str) {
    if let Some(text) = doc {
        for line in text.lines() {
            if line.is_empty() {
                out.push_str(&format!("{indent}///\n"));
            } else {
                out.push_str(&format!("{indent}/// {line}\n"));
            }
        }
    }
}

fn derive_line(equals: bool) -> &'static str {
    if equals {
        "#[derive(Debug, Clone, PartialEq)]"
    } else {
        "#[derive(Debug, Clone)]"
    }
}

pub fn render_type(type_: &CodeType) -> String {
    match type_ {
        CodeType::Primitive(p) => match p {
            Prim::Bool => "bool".to_string(),
            Prim::Int => "i64".to_string(),
            Prim::Double => "f64".to_string(),
            Prim::Str => "String".to_string(),
            Prim::Null => "()".to_string(),
            Prim::Bric => "Bric".to_string(),
        },
        CodeType::Named(path) => path.concat(),
        CodeType::Array(inner) => format!("Vec<{}>", render_type(inner)),
        CodeType::Optional(inner) => format!("Option<{}>", render_type(inner)),
        CodeType::Tuple(items) => {
            let parts: Vec<String> = items.iter().map(render_type).collect();
            if parts.len() == 1 {
                format!("({},)", parts[0])
            } else {
                format!("({})", parts.join(", "))
            }
        }
        CodeType::Indirect(inner) => format!("Box<{}>", render_type(inner)),
        CodeType::Map(inner) => format!("IndexMap<String, {}>", render_type(inner)),
    }
}

fn f64_literal(n: f64) -> String {
    let text = bric::encode(&Bric::Num(n));
    if text == "null" {
        return "f64::NAN".to_string();
    }
    if text.contains('.') || text.contains('e') || text.contains('E') {
        text
    } else {
        format!("{text}.0")
    }
}

fn bric_expr(value: &Bric) -> String {
    match value {
        Bric::Null => "Bric::Null".to_string(),
        Bric::Bool(b) => format!("Bric::Bool({b})"),
        Bric::Num(n) => format!("Bric::Num({})", f64_literal(*n)),
        Bric::Str(s) => format!("Bric::Str({s:?}.to_string())"),
        // container literals never reach enum raws or field defaults
        _ => "Bric::Null".to_string(),
    }
}

fn default_expr(field: &Field) -> String {
    match (&field.type_, &field.default) {
        (CodeType::Primitive(Prim::Bool), Some(Bric::Bool(b))) => b.to_string(),
        (CodeType::Primitive(Prim::Int), Some(Bric::Num(n))) => format!("{}", *n as i64),
        (CodeType::Primitive(Prim::Double), Some(Bric::Num(n))) => f64_literal(*n),
        (CodeType::Primitive(Prim::Str), Some(Bric::Str(s))) => format!("{s:?}.to_string()"),
        _ => "Default::default()".to_string(),
    }
}

fn render_decl(out: &mut String, decl: &CodeDecl, prefix: &str) {
    match decl {
        CodeDecl::Struct {
            name,
            doc,
            access,
            fields,
            rest,
            deny_additional,
            transparent,
            negative,
            nested,
            conformances,
        } => {
            let flat = format!("{prefix}{name}");
            render_struct(
                out,
                &flat,
                doc,
                *access,
                fields,
                rest.as_ref(),
                *deny_additional,
                *transparent,
                negative.as_deref(),
                conformances.contains("PartialEq"),
            );
            for inner in nested {
                render_decl(out, inner, &flat);
            }
        }
        CodeDecl::Sum {
            name,
            doc,
            access,
            cases,
            exclusive,
            nested,
            conformances,
        } => {
            let flat = format!("{prefix}{name}");
            render_sum(
                out,
                &flat,
                doc,
                *access,
                cases,
                *exclusive,
                conformances.contains("PartialEq"),
            );
            for inner in nested {
                render_decl(out, inner, &flat);
            }
        }
        CodeDecl::Alias {
            name,
            doc,
            access,
            target,
        } => {
            let flat = format!("{prefix}{name}");
            out.push('\n');
            push_doc(out, doc, "");
            out.push_str(&format!(
                "{}type {} = {};\n",
                access_str(*access),
                flat,
                render_type(target)
            ));
        }
        CodeDecl::Enum {
            name,
            doc,
            access,
            raw: _,
            cases,
        } => {
            let flat = format!("{prefix}{name}");
            render_enum(out, &flat, doc, *access, cases);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_struct(
    out: &mut String,
    flat: &str,
    doc: &Option<String>,
    access: Access,
    fields: &[Field],
    rest: Option<&RestField>,
    deny_additional: bool,
    transparent: bool,
    negative: Option<&str>,
    equals: bool,
) {
    let acc = access_str(access);

    out.push('\n');
    push_doc(out, doc, "");
    out.push_str(derive_line(equals));
    out.push('\n');
    out.push_str(&format!("{acc}struct {flat} {{\n"));
    for field in fields {
        push_doc(out, &field.doc, TAB);
        out.push_str(&format!(
            "{TAB}pub {}: {},\n",
            field.name,
            render_type(&field.type_)
        ));
    }
    if let Some(rest) = rest {
        out.push_str(&format!(
            "{TAB}pub {}: IndexMap<String, {}>,\n",
            rest.name,
            render_type(&rest.value)
        ));
    }
    out.push_str("}\n");

    // encode
    out.push_str(&format!("\nimpl ToBric for {flat} {{\n"));
    out.push_str(&format!("{TAB}fn to_bric(&self) -> Bric {{\n"));
    if transparent {
        let value = &fields[0].name;
        out.push_str(&format!("{TAB}{TAB}self.{value}.to_bric()\n"));
    } else {
        let has_inserts = !fields.is_empty() || rest.is_some();
        if has_inserts {
            out.push_str(&format!("{TAB}{TAB}let mut obj = IndexMap::new();\n"));
        } else {
            out.push_str(&format!("{TAB}{TAB}let obj = IndexMap::new();\n"));
        }
        for field in fields {
            let key = format!("{:?}", field.json_name);
            if matches!(field.type_, CodeType::Optional(_)) && !field.required {
                out.push_str(&format!(
                    "{TAB}{TAB}if let Some(value) = &self.{} {{\n",
                    field.name
                ));
                out.push_str(&format!(
                    "{TAB}{TAB}{TAB}obj.insert({key}.to_string(), value.to_bric());\n"
                ));
                out.push_str(&format!("{TAB}{TAB}}}\n"));
            } else {
                out.push_str(&format!(
                    "{TAB}{TAB}obj.insert({key}.to_string(), self.{}.to_bric());\n",
                    field.name
                ));
            }
        }
        if let Some(rest) = rest {
            out.push_str(&format!(
                "{TAB}{TAB}for (key, value) in &self.{} {{\n",
                rest.name
            ));
            out.push_str(&format!(
                "{TAB}{TAB}{TAB}obj.insert(key.clone(), value.to_bric());\n"
            ));
            out.push_str(&format!("{TAB}{TAB}}}\n"));
        }
        out.push_str(&format!("{TAB}{TAB}Bric::Obj(obj)\n"));
    }
    out.push_str(&format!("{TAB}}}\n"));
    out.push_str("}\n");

    // decode
    out.push_str(&format!("\nimpl FromBric for {flat} {{\n"));
    out.push_str(&format!(
        "{TAB}fn from_bric(bric: &Bric) -> Result<Self, BindError> {{\n"
    ));
    if let Some(negative) = negative {
        out.push_str(&format!(
            "{TAB}{TAB}if {flat}{negative}::from_bric(bric).is_ok() {{\n"
        ));
        out.push_str(&format!(
            "{TAB}{TAB}{TAB}return Err(BindError::new(BindErrorKind::NotSchemaMatched, {flat:?}));\n"
        ));
        out.push_str(&format!("{TAB}{TAB}}}\n"));
    }
    if transparent {
        let value = &fields[0].name;
        out.push_str(&format!(
            "{TAB}{TAB}Ok(Self {{ {value}: FromBric::from_bric(bric)? }})\n"
        ));
    } else {
        out.push_str(&format!(
            "{TAB}{TAB}let obj = helpers::as_obj(bric, {flat:?})?;\n"
        ));
        let known: Vec<String> = fields
            .iter()
            .map(|f| format!("{:?}", f.json_name))
            .collect();
        let known = known.join(", ");
        if deny_additional {
            out.push_str(&format!(
                "{TAB}{TAB}helpers::deny_unknown(obj, &[{known}], {flat:?})?;\n"
            ));
        }
        out.push_str(&format!("{TAB}{TAB}Ok(Self {{\n"));
        for field in fields {
            let key = format!("{:?}", field.json_name);
            if field.required {
                out.push_str(&format!(
                    "{TAB}{TAB}{TAB}{}: helpers::req(obj, {key}, {flat:?})?,\n",
                    field.name
                ));
            } else if field.default.is_some() {
                out.push_str(&format!("{TAB}{TAB}{TAB}{}: match obj.get({key}) {{\n", field.name));
                out.push_str(&format!(
                    "{TAB}{TAB}{TAB}{TAB}Some(value) => FromBric::from_bric(value).map_err(|e| e.at({key}))?,\n"
                ));
                out.push_str(&format!(
                    "{TAB}{TAB}{TAB}{TAB}None => {},\n",
                    default_expr(field)
                ));
                out.push_str(&format!("{TAB}{TAB}{TAB}}},\n"));
            } else {
                out.push_str(&format!(
                    "{TAB}{TAB}{TAB}{}: helpers::opt(obj, {key})?,\n",
                    field.name
                ));
            }
        }
        if let Some(rest) = rest {
            out.push_str(&format!(
                "{TAB}{TAB}{TAB}{}: helpers::collect_rest(obj, &[{known}])?,\n",
                rest.name
            ));
        }
        out.push_str(&format!("{TAB}{TAB}}})\n"));
    }
    out.push_str(&format!("{TAB}}}\n"));
    out.push_str("}\n");
}

fn render_sum(
    out: &mut String,
    flat: &str,
    doc: &Option<String>,
    access: Access,
    cases: &[SumCase],
    exclusive: bool,
    equals: bool,
) {
    let acc = access_str(access);

    out.push('\n');
    push_doc(out, doc, "");
    out.push_str(derive_line(equals));
    out.push('\n');
    out.push_str(&format!("{acc}enum {flat} {{\n"));
    for case in cases {
        match &case.payload {
            Some(payload) => out.push_str(&format!(
                "{TAB}{}({}),\n",
                case.name,
                render_type(payload)
            )),
            None => out.push_str(&format!("{TAB}{},\n", case.name)),
        }
    }
    out.push_str("}\n");

    // encode
    out.push_str(&format!("\nimpl ToBric for {flat} {{\n"));
    out.push_str(&format!("{TAB}fn to_bric(&self) -> Bric {{\n"));
    out.push_str(&format!("{TAB}{TAB}match self {{\n"));
    for case in cases {
        match &case.payload {
            Some(_) => out.push_str(&format!(
                "{TAB}{TAB}{TAB}Self::{}(value) => value.to_bric(),\n",
                case.name
            )),
            None => out.push_str(&format!(
                "{TAB}{TAB}{TAB}Self::{} => Bric::Null,\n",
                case.name
            )),
        }
    }
    out.push_str(&format!("{TAB}{TAB}}}\n"));
    out.push_str(&format!("{TAB}}}\n"));
    out.push_str("}\n");

    // decode
    out.push_str(&format!("\nimpl FromBric for {flat} {{\n"));
    out.push_str(&format!(
        "{TAB}fn from_bric(bric: &Bric) -> Result<Self, BindError> {{\n"
    ));
    if exclusive {
        out.push_str(&format!("{TAB}{TAB}let mut matched = Vec::new();\n"));
        out.push_str(&format!("{TAB}{TAB}let mut causes = Vec::new();\n"));
        out.push_str(&format!("{TAB}{TAB}let mut value = None;\n"));
        for (i, case) in cases.iter().enumerate() {
            let probe = match &case.payload {
                Some(payload) => render_type(payload),
                None => "()".to_string(),
            };
            out.push_str(&format!(
                "{TAB}{TAB}match <{probe} as FromBric>::from_bric(bric) {{\n"
            ));
            match &case.payload {
                Some(_) => {
                    out.push_str(&format!("{TAB}{TAB}{TAB}Ok(v) => {{\n"));
                    out.push_str(&format!("{TAB}{TAB}{TAB}{TAB}matched.push({i});\n"));
                    out.push_str(&format!("{TAB}{TAB}{TAB}{TAB}if value.is_none() {{\n"));
                    out.push_str(&format!(
                        "{TAB}{TAB}{TAB}{TAB}{TAB}value = Some(Self::{}(v));\n",
                        case.name
                    ));
                    out.push_str(&format!("{TAB}{TAB}{TAB}{TAB}}}\n"));
                    out.push_str(&format!("{TAB}{TAB}{TAB}}}\n"));
                }
                None => {
                    out.push_str(&format!("{TAB}{TAB}{TAB}Ok(()) => {{\n"));
                    out.push_str(&format!("{TAB}{TAB}{TAB}{TAB}matched.push({i});\n"));
                    out.push_str(&format!("{TAB}{TAB}{TAB}{TAB}if value.is_none() {{\n"));
                    out.push_str(&format!(
                        "{TAB}{TAB}{TAB}{TAB}{TAB}value = Some(Self::{});\n",
                        case.name
                    ));
                    out.push_str(&format!("{TAB}{TAB}{TAB}{TAB}}}\n"));
                    out.push_str(&format!("{TAB}{TAB}{TAB}}}\n"));
                }
            }
            out.push_str(&format!("{TAB}{TAB}{TAB}Err(e) => causes.push(e),\n"));
            out.push_str(&format!("{TAB}{TAB}}}\n"));
        }
        out.push_str(&format!("{TAB}{TAB}if matched.len() > 1 {{\n"));
        out.push_str(&format!("{TAB}{TAB}{TAB}return Err(BindError::new(\n"));
        out.push_str(&format!(
            "{TAB}{TAB}{TAB}{TAB}BindErrorKind::ExactlyOneViolated {{ matched }},\n"
        ));
        out.push_str(&format!("{TAB}{TAB}{TAB}{TAB}{flat:?},\n"));
        out.push_str(&format!("{TAB}{TAB}{TAB}));\n"));
        out.push_str(&format!("{TAB}{TAB}}}\n"));
        out.push_str(&format!("{TAB}{TAB}match value {{\n"));
        out.push_str(&format!("{TAB}{TAB}{TAB}Some(v) => Ok(v),\n"));
        out.push_str(&format!("{TAB}{TAB}{TAB}None => Err(BindError::new(\n"));
        out.push_str(&format!(
            "{TAB}{TAB}{TAB}{TAB}BindErrorKind::NoAlternativeMatched {{ causes }},\n"
        ));
        out.push_str(&format!("{TAB}{TAB}{TAB}{TAB}{flat:?},\n"));
        out.push_str(&format!("{TAB}{TAB}{TAB})),\n"));
        out.push_str(&format!("{TAB}{TAB}}}\n"));
    } else {
        out.push_str(&format!("{TAB}{TAB}let mut causes = Vec::new();\n"));
        for case in cases {
            let probe = match &case.payload {
                Some(payload) => render_type(payload),
                None => "()".to_string(),
            };
            out.push_str(&format!(
                "{TAB}{TAB}match <{probe} as FromBric>::from_bric(bric) {{\n"
            ));
            match &case.payload {
                Some(_) => out.push_str(&format!(
                    "{TAB}{TAB}{TAB}Ok(v) => return Ok(Self::{}(v)),\n",
                    case.name
                )),
                None => out.push_str(&format!(
                    "{TAB}{TAB}{TAB}Ok(()) => return Ok(Self::{}),\n",
                    case.name
                )),
            }
            out.push_str(&format!("{TAB}{TAB}{TAB}Err(e) => causes.push(e),\n"));
            out.push_str(&format!("{TAB}{TAB}}}\n"));
        }
        out.push_str(&format!("{TAB}{TAB}Err(BindError::new(\n"));
        out.push_str(&format!(
            "{TAB}{TAB}{TAB}BindErrorKind::NoAlternativeMatched {{ causes }},\n"
        ));
        out.push_str(&format!("{TAB}{TAB}{TAB}{flat:?},\n"));
        out.push_str(&format!("{TAB}{TAB}))\n"));
    }
    out.push_str(&format!("{TAB}}}\n"));
    out.push_str("}\n");
}

fn render_enum(
    out: &mut String,
    flat: &str,
    doc: &Option<String>,
    access: Access,
    cases: &[(String, Bric)],
) {
    let acc = access_str(access);

    out.push('\n');
    push_doc(out, doc, "");
    out.push_str(derive_line(true));
    out.push('\n');
    out.push_str(&format!("{acc}enum {flat} {{\n"));
    for (name, _) in cases {
        out.push_str(&format!("{TAB}{name},\n"));
    }
    out.push_str("}\n");

    out.push_str(&format!("\nimpl ToBric for {flat} {{\n"));
    out.push_str(&format!("{TAB}fn to_bric(&self) -> Bric {{\n"));
    out.push_str(&format!("{TAB}{TAB}match self {{\n"));
    for (name, literal) in cases {
        out.push_str(&format!(
            "{TAB}{TAB}{TAB}Self::{name} => {},\n",
            bric_expr(literal)
        ));
    }
    out.push_str(&format!("{TAB}{TAB}}}\n"));
    out.push_str(&format!("{TAB}}}\n"));
    out.push_str("}\n");

    out.push_str(&format!("\nimpl FromBric for {flat} {{\n"));
    out.push_str(&format!(
        "{TAB}fn from_bric(bric: &Bric) -> Result<Self, BindError> {{\n"
    ));
    for (name, literal) in cases {
        out.push_str(&format!(
            "{TAB}{TAB}if *bric == {} {{\n",
            bric_expr(literal)
        ));
        out.push_str(&format!("{TAB}{TAB}{TAB}return Ok(Self::{name});\n"));
        out.push_str(&format!("{TAB}{TAB}}}\n"));
    }
    out.push_str(&format!("{TAB}{TAB}Err(BindError::new(\n"));
    out.push_str(&format!(
        "{TAB}{TAB}{TAB}BindErrorKind::InvalidEnumValue {{ value: bric.clone() }},\n"
    ));
    out.push_str(&format!("{TAB}{TAB}{TAB}{flat:?},\n"));
    out.push_str(&format!("{TAB}{TAB}))\n"));
    out.push_str("    }\n");
    out.push_str("}\n");
}
