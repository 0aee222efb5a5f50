#[cfg(test)]
mod tests {
    use crate::api::*;
    use crate::config::*;
    use crate::error::*;
    use crate::event::*;
    use crate::message::*;
    use crate::money::*;
    use crate::product::*;
    use crate::project::*;
    use crate::session::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = ChatMessage::user("3 dobradiças curvas");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.kind, MessageKind::Text);
        assert_eq!(msg.content, "3 dobradiças curvas");
        assert!(msg.options.is_empty());
        assert!(!msg.is_from_bot());
    }

    #[test]
    fn test_message_bot_with_options() {
        let msg = ChatMessage::bot("Qual acabamento?").with_options(vec![
            ChatOption { id: "mdf".to_string(), label: "MDF".to_string() },
            ChatOption { id: "laca".to_string(), label: "Laca".to_string() },
        ]);
        assert!(msg.is_from_bot());
        assert_eq!(msg.options.len(), 2);
        assert_eq!(msg.options[1].label, "Laca");
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = ChatMessage::user("a");
        let b = ChatMessage::user("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_timestamp_is_iso8601() {
        let msg = ChatMessage::bot("oi");
        assert!(chrono::DateTime::parse_from_rfc3339(&msg.timestamp).is_ok());
        assert!(msg.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_message_type_field_name() {
        let msg = ChatMessage::new("blob:audio", Sender::User, MessageKind::Audio);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "audio");
        assert_eq!(json["sender"], "user");
        assert!(json.get("options").is_none());
    }

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_generate_token_format() {
        let token = generate_token();
        let parts: Vec<&str> = token.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_chat_mode_parse() {
        assert_eq!(ChatMode::parse("single"), Some(ChatMode::Single));
        assert_eq!(ChatMode::parse("multiple"), Some(ChatMode::Multiple));
        assert_eq!(ChatMode::parse("batch"), None);
        assert_eq!(ChatMode::Multiple.as_str(), "multiple");
        assert_eq!(ChatMode::default(), ChatMode::Single);
    }

    #[test]
    fn test_request_status_serialization() {
        assert_eq!(serde_json::to_string(&RequestStatus::Loading).unwrap(), "\"loading\"");
        assert_eq!(RequestStatus::default(), RequestStatus::Idle);
    }

    // ─── Product Tests ───────────────────────────────────────

    #[test]
    fn test_product_line_total() {
        let item = ProductItem::new("Puxador", 4, 12.5);
        assert_eq!(item.line_total(), 50.0);
    }

    #[test]
    fn test_product_same_name_ignores_case() {
        let item = ProductItem::new("Dobradiça", 1, 8.0);
        assert!(item.same_name("dobradiça"));
        assert!(item.same_name("DOBRADIÇA"));
        assert!(!item.same_name("dobradica"));
    }

    #[test]
    fn test_product_deserialize_extracted_shape() {
        let json = r#"{"name": "Corrediça", "quantity": 2, "price": 35.9, "dimensions": "45cm"}"#;
        let item: ProductItem = serde_json::from_str(json).unwrap();
        assert!(item.id.is_none());
        assert_eq!(item.quantity, 2);
        assert_eq!(item.dimensions.as_deref(), Some("45cm"));
        assert!(item.componentes.is_empty());
    }

    #[test]
    fn test_product_quantity_defaults_to_one() {
        let item: ProductItem = serde_json::from_str(r#"{"name": "Prateleira"}"#).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.price, 0.0);
    }

    #[test]
    fn test_product_serialization_skips_empty_fields() {
        let json = serde_json::to_value(ProductItem::new("Gaveta", 1, 90.0)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("componentes"));
        assert!(!obj.contains_key("dimensions"));
    }

    // ─── API Tests ───────────────────────────────────────────

    #[test]
    fn test_chat_reply_accepts_null_optionals() {
        let json = r#"{
            "response": "Ok",
            "pdf_ready": null,
            "pdf_url": null,
            "download_url": null,
            "session_id": "session_1_abc",
            "options": null
        }"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.response, "Ok");
        assert!(!reply.pdf_ready);
        assert!(reply.options.is_empty());
        assert!(reply.pdf_path().is_none());
    }

    #[test]
    fn test_chat_reply_null_response_is_empty() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response": null, "options": []}"#).unwrap();
        assert_eq!(reply.response, "");
    }

    #[test]
    fn test_quote_snapshot_accepts_null_fields() {
        let json = r#"{
            "moveis": [
                {"id": 1, "nome": "Armário", "preco_total": 900.0, "dimensoes": null,
                 "material": null, "cor": null, "componentes": null},
                {"id": 2, "nome": "Nicho", "preco_total": null,
                 "componentes": [{"nome": "Prateleira", "categoria": null,
                                  "quantidade": null, "preco_unitario": 40.0, "subtotal": null}]}
            ],
            "total": null,
            "finalizado": null
        }"#;
        let snapshot: QuoteSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.total, 0.0);
        assert!(!snapshot.finalizado);

        let products = snapshot.into_products();
        assert_eq!(products.len(), 2);
        assert!(products[0].componentes.is_empty());
        assert_eq!(products[1].price, 0.0);
        assert_eq!(products[1].componentes[0].name, "Prateleira");
        assert_eq!(products[1].componentes[0].quantity, 0);
    }

    #[test]
    fn test_quote_snapshot_null_list() {
        let snapshot: QuoteSnapshot =
            serde_json::from_str(r#"{"moveis": null, "total": 0, "finalizado": false}"#).unwrap();
        assert!(snapshot.moveis.is_empty());
    }

    #[test]
    fn test_extract_reply_accepts_nulls() {
        let json = r#"{"products": [
            {"name": "Puxador", "quantity": null, "price": null, "componentes": null}
        ]}"#;
        let reply: ExtractReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.products[0].quantity, 1);
        assert_eq!(reply.products[0].price, 0.0);
        assert!(reply.products[0].componentes.is_empty());

        let empty: ExtractReply = serde_json::from_str(r#"{"products": null}"#).unwrap();
        assert!(empty.products.is_empty());
    }

    #[test]
    fn test_single_chat_request_body() {
        let req = ChatRequest::single("quero um armário", "session_1_abc");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], "quero um armário");
        assert_eq!(json["session_id"], "session_1_abc");
        assert_eq!(json["mode"], "single");
        assert!(json.get("products").is_none());
    }

    #[test]
    fn test_generate_multiple_quote_request_body() {
        let req = ChatRequest::generate_multiple_quote(
            "session_1_abc",
            vec![ProductItem::new("Puxador", 3, 10.0)],
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], GENERATE_MULTIPLE_QUOTE);
        assert_eq!(json["mode"], "multiple");
        assert_eq!(json["products"][0]["name"], "Puxador");
        assert_eq!(json["products"][0]["quantity"], 3);
    }

    #[test]
    fn test_chat_reply_pdf_ready_uses_download_url() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"response": "Pronto", "pdf_ready": true, "download_url": "/download/q.pdf", "session_id": "s"}"#,
        )
        .unwrap();
        assert_eq!(reply.pdf_path(), Some("/download/q.pdf"));
    }

    #[test]
    fn test_chat_reply_pdf_not_ready() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"response": "Ainda não", "pdf_ready": false, "download_url": "/download/q.pdf"}"#,
        )
        .unwrap();
        assert_eq!(reply.pdf_path(), None);
    }

    #[test]
    fn test_chat_reply_legacy_pdf_url() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response": "ok", "pdf_url": "/pdf/1.pdf", "session_id": "s"}"#).unwrap();
        assert_eq!(reply.pdf_path(), Some("/pdf/1.pdf"));
        let none: ChatReply = serde_json::from_str(r#"{"response": "ok", "pdf_url": null}"#).unwrap();
        assert_eq!(none.pdf_path(), None);
    }

    #[test]
    fn test_chat_reply_options() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"response": "Escolha", "options": [{"id": "sim", "label": "Sim"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.options.len(), 1);
        assert_eq!(reply.options[0].id, "sim");
    }

    #[test]
    fn test_quote_snapshot_maps_moveis_with_quantity_one() {
        let json = r#"{
            "moveis": [{
                "id": 7,
                "nome": "Armário aéreo",
                "preco_total": 1250.0,
                "dimensoes": "120x60x35",
                "material": "MDF",
                "cor": "BRA",
                "componentes": [
                    {"nome": "Dobradiça", "categoria": "ferragem", "quantidade": 4, "preco_unitario": 8.0, "subtotal": 32.0}
                ]
            }],
            "total": 1250.0,
            "finalizado": false
        }"#;
        let snapshot: QuoteSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.total, 1250.0);
        let items = snapshot.into_products();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, Some(MovelId(7)));
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[0].price, 1250.0);
        assert_eq!(items[0].color.as_deref(), Some("BRA"));
        assert_eq!(items[0].componentes[0].name, "Dobradiça");
        assert_eq!(items[0].componentes[0].subtotal, 32.0);
    }

    #[test]
    fn test_movel_accepts_english_aliases() {
        let m: MovelItem =
            serde_json::from_str(r#"{"id": 1, "name": "Balcão", "price": 800.0, "dimensions": "80x50"}"#).unwrap();
        assert_eq!(m.nome, "Balcão");
        assert_eq!(m.preco_total, 800.0);
        assert_eq!(m.dimensoes.as_deref(), Some("80x50"));
    }

    #[test]
    fn test_empty_quote_snapshot() {
        let snapshot: QuoteSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.moveis.is_empty());
        assert!(!snapshot.finalizado);
    }

    #[test]
    fn test_error_body_prefers_error_then_detail() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error": "sessão expirada", "detail": "x"}"#).unwrap();
        assert_eq!(body.resolve().as_deref(), Some("sessão expirada"));

        let body: ApiErrorBody = serde_json::from_str(r#"{"detail": "Móvel não encontrado"}"#).unwrap();
        assert_eq!(body.resolve().as_deref(), Some("Móvel não encontrado"));

        let body: ApiErrorBody = serde_json::from_str(r#"{"message": "falhou"}"#).unwrap();
        assert_eq!(body.resolve().as_deref(), Some("falhou"));
    }

    #[test]
    fn test_error_body_ignores_structured_detail() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#).unwrap();
        assert_eq!(body.resolve(), None);
    }

    #[test]
    fn test_error_body_empty() {
        assert_eq!(ApiErrorBody::default().resolve(), None);
        let blank = ApiErrorBody { error: Some("  ".to_string()), ..Default::default() };
        assert_eq!(blank.resolve(), None);
    }

    // ─── Operation Tests ─────────────────────────────────────

    #[test]
    fn test_operation_resolves_server_message() {
        let err = QuoteError::Api { status: 400, message: Some("Mensagem vazia".to_string()) };
        assert_eq!(Operation::SendSingleChat.resolve_error(&err), "Mensagem vazia");
    }

    #[test]
    fn test_operation_resolves_rejection_default() {
        let err = QuoteError::Api { status: 500, message: None };
        assert_eq!(
            Operation::ExtractProducts.resolve_error(&err),
            "Falha ao extrair produtos da mensagem."
        );
        assert_eq!(
            Operation::GenerateMultipleQuote.resolve_error(&err),
            "Falha ao gerar o orçamento final."
        );
    }

    #[test]
    fn test_operation_resolves_fallback_for_client_errors() {
        let err = QuoteError::Serialization("expected value at line 1".to_string());
        assert_eq!(Operation::SendSingleChat.resolve_error(&err), "Erro desconhecido.");
        assert_eq!(Operation::ExtractProducts.resolve_error(&err), "Erro na extração de produtos.");
        let net = QuoteError::Network("Failed to fetch".to_string());
        assert_eq!(
            Operation::GenerateMultipleQuote.resolve_error(&net),
            "Erro ao gerar orçamento múltiplo."
        );
    }

    #[test]
    fn test_operation_chat_prefixes() {
        assert_eq!(Operation::SendSingleChat.chat_error_prefix(), Some("❌ Erro: "));
        assert_eq!(Operation::ExtractProducts.chat_error_prefix(), Some("⚠️ Erro na extração: "));
        assert_eq!(Operation::DeleteMovel.chat_error_prefix(), None);
        assert_eq!(Operation::FetchQuote.chat_error_prefix(), None);
    }

    #[test]
    fn test_operation_tracks_status() {
        assert!(Operation::DeleteMovel.tracks_status());
        assert!(!Operation::FetchQuote.tracks_status());
    }

    #[test]
    fn test_session_event_serialization() {
        let event = SessionEvent::OperationFailed {
            operation: Operation::DeleteMovel,
            message: "Falha".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "operation_failed");
        assert_eq!(json["operation"], "delete_movel");
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = QuoteError::Api { status: 404, message: Some("não encontrado".to_string()) };
        assert_eq!(err.to_string(), "HTTP 404: não encontrado");
        let err = QuoteError::Api { status: 502, message: None };
        assert_eq!(err.to_string(), "HTTP 502: no message");
        assert_eq!(QuoteError::Network("offline".to_string()).to_string(), "Network error: offline");
    }

    #[test]
    fn test_error_server_message() {
        let err = QuoteError::Api { status: 400, message: Some("x".to_string()) };
        assert_eq!(err.server_message(), Some("x"));
        assert_eq!(QuoteError::JsInterop("y".to_string()).server_message(), None);
    }

    #[test]
    fn test_operation_ignores_blank_server_message() {
        let err = QuoteError::Api { status: 400, message: Some("   ".to_string()) };
        assert_eq!(Operation::DeleteMovel.resolve_error(&err), "Falha ao remover o item.");
        let interop = QuoteError::JsInterop("callback threw".to_string());
        assert_eq!(Operation::DeleteMovel.resolve_error(&interop), "Erro desconhecido.");
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: QuoteError = serde_json::from_str::<ChatReply>("{{").unwrap_err().into();
        assert!(matches!(err, QuoteError::Serialization(_)));
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = ClientConfig::default().with_api_base("http://api.example.com/");
        assert_eq!(config.api_base, "http://api.example.com");
        assert_eq!(config.endpoint("/chat"), "http://api.example.com/chat");
        assert_eq!(config.endpoint("extract-products"), "http://api.example.com/extract-products");
    }

    #[test]
    fn test_config_pdf_link_concatenates() {
        let config = ClientConfig::default().with_api_base("http://api.example.com");
        assert_eq!(config.pdf_link("/download/q.pdf"), "http://api.example.com/download/q.pdf");
    }

    #[test]
    fn test_config_pdf_link_relative_path() {
        let config = ClientConfig::default().with_api_base("http://api.example.com/");
        assert_eq!(config.pdf_link("downloads/x.pdf"), "http://api.example.com/downloads/x.pdf");
    }

    #[test]
    fn test_config_default_names() {
        let config = ClientConfig::default();
        assert_eq!(config.bot_name, BOT_NAME);
        assert!(!config.api_base.ends_with('/'));
        assert!(!config.display_name.is_empty());
    }

    // ─── Money Tests ─────────────────────────────────────────

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(9.9), "R$ 9,90");
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(-15.5), "-R$ 15,50");
    }

    #[test]
    fn test_list_total() {
        let items = vec![
            ProductItem::new("Puxador", 4, 12.5),
            ProductItem::new("Gaveta", 2, 100.0),
        ];
        assert_eq!(list_total(&items), 250.0);
        assert_eq!(list_total(&[]), 0.0);
    }

    #[test]
    fn test_snapshot_fill_totals() {
        let snapshot = SessionSnapshot {
            session_id: "s".to_string(),
            mode: ChatMode::Multiple,
            status: RequestStatus::Idle,
            error: None,
            messages: Vec::new(),
            product_list: vec![ProductItem::new("Porta", 2, 600.0)],
            pdf_url: None,
            quote: None,
            total: 0.0,
            total_display: String::new(),
        }
        .fill_totals();
        assert_eq!(snapshot.total, 1200.0);
        assert_eq!(snapshot.total_display, "R$ 1.200,00");
        assert!(!snapshot.is_loading());
    }

    // ─── Project Tests ───────────────────────────────────────

    #[test]
    fn test_project_serialization_skips_missing() {
        let json = serde_json::to_value(Project::new("Cozinha Silva")).unwrap();
        assert_eq!(json["name"], "Cozinha Silva");
        assert!(json.get("id").is_none());
        assert!(json.get("client").is_none());
    }
}
